//! Basic 2D types and tolerances.
//!
//! - `GeomCfg`: centralizes epsilons for novelty, incidence, parallelism and tangency.
//! - `Line2`: implicit line `n · x = c` with unit normal.
//! - `Circle2`: center + radius.

use nalgebra::{Matrix2, Vector2};

use super::util::{canonicalize_unit, cross};
use crate::cfg::{INCIDENCE_EPS_GEN, INCIDENCE_EPS_VAL, NEW_EPS, PARALLEL_EPS, TANGENT_EPS};

/// Geometry configuration (tolerances) for one generation pass.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Distinctness radius: candidates closer than this to a known point are dropped.
    pub eps_new: f64,
    /// Incidence slack during generation.
    pub eps_incidence_gen: f64,
    /// Incidence slack when validating a finished pool (stricter).
    pub eps_incidence_val: f64,
    pub eps_parallel: f64,
    pub eps_tangent: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_new: NEW_EPS,
            eps_incidence_gen: INCIDENCE_EPS_GEN,
            eps_incidence_val: INCIDENCE_EPS_VAL,
            eps_parallel: PARALLEL_EPS,
            eps_tangent: TANGENT_EPS,
        }
    }
}

/// Implicit line `n · x = c`.
///
/// Invariants:
/// - `n` has unit norm, so `|n·p − c|` is the Euclidean distance of `p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Line2 {
    /// Normalize `(n, c)`; None for a zero or non-finite normal.
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Option<Self> {
        canonicalize_unit(n, c).map(|(n, c)| Self { n, c })
    }

    /// Line through two distinct positions.
    pub fn through(a: Vector2<f64>, b: Vector2<f64>) -> Option<Self> {
        let d = b - a;
        let n = Vector2::new(-d.y, d.x);
        Self::new(n, n.dot(&a))
    }

    #[inline]
    pub fn signed_distance(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }

    #[inline]
    pub fn distance(&self, p: Vector2<f64>) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Unit direction: the normal rotated by +90°.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(-self.n.y, self.n.x)
    }

    #[inline]
    pub fn foot(&self, p: Vector2<f64>) -> Vector2<f64> {
        p - self.n * self.signed_distance(p)
    }
}

/// Circle `|x − center| = r`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle2 {
    pub center: Vector2<f64>,
    pub r: f64,
}

impl Circle2 {
    #[inline]
    pub fn new(center: Vector2<f64>, r: f64) -> Self {
        Self { center, r }
    }

    /// Circle centered at `center` passing through `p`.
    #[inline]
    pub fn through_point(center: Vector2<f64>, p: Vector2<f64>) -> Self {
        Self::new(center, (p - center).norm())
    }

    /// Circumcircle of three positions; None if they are (numerically) collinear.
    pub fn through_three(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Option<Self> {
        if cross(a, b, c).abs() < PARALLEL_EPS {
            return None;
        }
        // Perpendicular bisector system: 2(b−a)·x = |b|²−|a|², 2(c−a)·x = |c|²−|a|².
        let m = Matrix2::new(
            2.0 * (b.x - a.x),
            2.0 * (b.y - a.y),
            2.0 * (c.x - a.x),
            2.0 * (c.y - a.y),
        );
        let rhs = Vector2::new(
            b.norm_squared() - a.norm_squared(),
            c.norm_squared() - a.norm_squared(),
        );
        let center = m.try_inverse()? * rhs;
        Some(Self::through_point(center, a))
    }

    #[inline]
    pub fn distance(&self, p: Vector2<f64>) -> f64 {
        ((p - self.center).norm() - self.r).abs()
    }
}
