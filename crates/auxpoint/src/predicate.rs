//! Predicate vocabulary handed to the deduction engine.
//!
//! - `coll(a, b, c)`: three points on one line.
//! - `cong(a, b, c, d)`: |ab| = |cd|.
//! - `perp(a, b, c, d)`: ab ⟂ cd.
//! - `midp(m, a, b)`: m is the midpoint of ab.
//!
//! Predicates carry point NAMES; `holds` re-evaluates one numerically given a
//! name → position lookup.

use std::fmt;

use nalgebra::Vector2;

use crate::geom2::{distance, midpoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Collinear,
    Congruent,
    Perpendicular,
    Midpoint,
}

impl PredicateKind {
    /// Engine wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collinear => "coll",
            Self::Congruent => "cong",
            Self::Perpendicular => "perp",
            Self::Midpoint => "midp",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "coll" => Some(Self::Collinear),
            "cong" => Some(Self::Congruent),
            "perp" => Some(Self::Perpendicular),
            "midp" => Some(Self::Midpoint),
            _ => None,
        }
    }

    #[inline]
    pub fn arity(self) -> usize {
        match self {
            Self::Collinear | Self::Midpoint => 3,
            Self::Congruent | Self::Perpendicular => 4,
        }
    }
}

/// One atomic fact: kind, ordered point names, optional numeric arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub kind: PredicateKind,
    pub points: Vec<String>,
    pub values: Vec<f64>,
}

impl Predicate {
    fn of(kind: PredicateKind, names: &[&str]) -> Self {
        Self {
            kind,
            points: names.iter().map(|s| s.to_string()).collect(),
            values: Vec::new(),
        }
    }

    pub fn coll(a: &str, b: &str, c: &str) -> Self {
        Self::of(PredicateKind::Collinear, &[a, b, c])
    }

    pub fn cong(a: &str, b: &str, c: &str, d: &str) -> Self {
        Self::of(PredicateKind::Congruent, &[a, b, c, d])
    }

    pub fn perp(a: &str, b: &str, c: &str, d: &str) -> Self {
        Self::of(PredicateKind::Perpendicular, &[a, b, c, d])
    }

    pub fn midp(m: &str, a: &str, b: &str) -> Self {
        Self::of(PredicateKind::Midpoint, &[m, a, b])
    }

    /// Numeric check within `tol`.
    ///
    /// Returns None when the arity is wrong or a name cannot be resolved.
    /// Degenerate configurations (a zero-length segment in `coll`/`perp`) count
    /// as holding.
    pub fn holds<F>(&self, lookup: F, tol: f64) -> Option<bool>
    where
        F: Fn(&str) -> Option<Vector2<f64>>,
    {
        if self.points.len() != self.kind.arity() {
            return None;
        }
        let p: Vec<Vector2<f64>> = self
            .points
            .iter()
            .map(|n| lookup(n.as_str()))
            .collect::<Option<_>>()?;
        let ok = match self.kind {
            PredicateKind::Collinear => collinear_residual(p[0], p[1], p[2]) <= tol,
            PredicateKind::Congruent => {
                (distance(p[0], p[1]) - distance(p[2], p[3])).abs() <= tol
            }
            PredicateKind::Perpendicular => {
                let u = p[1] - p[0];
                let v = p[3] - p[2];
                let scale = u.norm() * v.norm();
                scale <= f64::EPSILON || (u.dot(&v) / scale).abs() <= tol
            }
            PredicateKind::Midpoint => distance(p[0], midpoint(p[1], p[2])) <= tol,
        };
        Some(ok)
    }
}

/// Smallest triangle height: twice the area over the longest side.
fn collinear_residual(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let longest = distance(a, b).max(distance(b, c)).max(distance(a, c));
    if longest <= f64::EPSILON {
        return 0.0;
    }
    let ab = b - a;
    let ac = c - a;
    (ab.x * ac.y - ab.y * ac.x).abs() / longest
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        for p in &self.points {
            write!(f, " {p}")?;
        }
        for v in &self.values {
            write!(f, " {v}")?;
        }
        Ok(())
    }
}
