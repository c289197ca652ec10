use nalgebra::{Matrix2, Vector2};

use super::types::{Circle2, Line2};

#[inline]
pub(crate) fn canonicalize_unit(n: Vector2<f64>, c: f64) -> Option<(Vector2<f64>, f64)> {
    let norm = n.norm();
    if !(norm.is_finite()) || norm <= 0.0 || !c.is_finite() {
        return None;
    }
    Some((n / norm, c / norm))
}

/// Twice the signed area of triangle (a, b, c).
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
pub fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm()
}

#[inline]
pub fn midpoint(a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    (a + b) * 0.5
}

/// Point reflection of `p` through `center`: `2·center − p`.
#[inline]
pub fn reflect_through(p: Vector2<f64>, center: Vector2<f64>) -> Vector2<f64> {
    center * 2.0 - p
}

/// Orthogonal projection of `p` onto `line`.
#[inline]
pub fn foot_of_perpendicular(p: Vector2<f64>, line: &Line2) -> Vector2<f64> {
    line.foot(p)
}

/// Intersection of two lines; None if parallel (`|det| < eps_parallel`).
pub fn intersect_lines(l1: &Line2, l2: &Line2, eps_parallel: f64) -> Option<Vector2<f64>> {
    let m = Matrix2::new(l1.n.x, l1.n.y, l2.n.x, l2.n.y);
    if m.determinant().abs() < eps_parallel {
        return None;
    }
    let x = m.try_inverse()? * Vector2::new(l1.c, l2.c);
    if x.x.is_finite() && x.y.is_finite() {
        Some(x)
    } else {
        None
    }
}

/// Intersection of a line and a circle: 0, 1 (tangent) or 2 points.
///
/// The center is projected onto the line; with `d` the projected distance,
/// `d > r + eps` misses, `|r − d| <= eps` touches at the projection, and
/// otherwise the two points sit at `±√(r² − d²)` along the line direction.
pub fn intersect_line_circle(
    line: &Line2,
    circle: &Circle2,
    eps_tangent: f64,
) -> Vec<Vector2<f64>> {
    let proj = line.foot(circle.center);
    let d = distance(circle.center, proj);
    if d > circle.r + eps_tangent {
        return Vec::new();
    }
    if (circle.r - d).abs() <= eps_tangent {
        return vec![proj];
    }
    let along = (circle.r * circle.r - d * d).max(0.0).sqrt();
    let dir = line.direction();
    vec![proj + dir * along, proj - dir * along]
}
