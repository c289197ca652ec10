//! Novelty and nontrivial-incidence gates.
//!
//! Both gates are read-only views over a `Snapshot`; the novelty gate also
//! consults the pool being built so near-duplicates from different families
//! collapse onto the first accepted name.

use std::collections::BTreeSet;

use nalgebra::Vector2;

use super::types::CandidatePool;
use crate::geom2::{distance, GeomCfg};
use crate::snapshot::{DefinedCircle, DefinedLine, Snapshot};

/// Rejects positions coincident with a known point or an accepted candidate.
#[derive(Clone, Copy, Debug)]
pub struct NoveltyFilter<'a> {
    snapshot: &'a Snapshot,
    eps: f64,
}

impl<'a> NoveltyFilter<'a> {
    pub fn new(snapshot: &'a Snapshot, cfg: &GeomCfg) -> Self {
        Self {
            snapshot,
            eps: cfg.eps_new,
        }
    }

    /// True unless `pos` is strictly closer than `eps_new` to a snapshot point or
    /// to a candidate already in `pool`.
    pub fn is_new(&self, pos: Vector2<f64>, pool: &CandidatePool) -> bool {
        let near = |q: Vector2<f64>| distance(pos, q) < self.eps;
        !(self.snapshot.points().iter().any(|p| near(p.pos)) || pool.iter().any(|c| near(c.pos)))
    }
}

/// Structure that witnesses a nontrivial incidence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Incidence {
    Line(usize),
    Circle(usize),
}

/// Accepts only positions that land on a line or circle unrelated to their
/// own construction.
#[derive(Clone, Copy, Debug)]
pub struct IncidenceValidator<'a> {
    lines: &'a [DefinedLine],
    circles: &'a [DefinedCircle],
    eps: f64,
}

impl<'a> IncidenceValidator<'a> {
    pub fn with_eps(snapshot: &'a Snapshot, eps: f64) -> Self {
        Self {
            lines: snapshot.lines(),
            circles: snapshot.circles(),
            eps,
        }
    }

    /// Generation-time gate (`eps_incidence_gen`).
    pub fn generation(snapshot: &'a Snapshot, cfg: &GeomCfg) -> Self {
        Self::with_eps(snapshot, cfg.eps_incidence_gen)
    }

    /// Stricter gate used to re-validate finished pools (`eps_incidence_val`).
    pub fn validation(snapshot: &'a Snapshot, cfg: &GeomCfg) -> Self {
        Self::with_eps(snapshot, cfg.eps_incidence_val)
    }

    /// First line (then circle) whose incident names avoid `parents` and which
    /// passes within `eps` of `pos`.
    pub fn witness(&self, pos: Vector2<f64>, parents: &BTreeSet<String>) -> Option<Incidence> {
        let unrelated = |names: &[String]| !names.iter().any(|n| parents.contains(n));
        let on_line = self
            .lines
            .iter()
            .position(|l| unrelated(&l.points) && l.line.distance(pos) < self.eps);
        if let Some(k) = on_line {
            return Some(Incidence::Line(k));
        }
        self.circles
            .iter()
            .position(|c| unrelated(&c.points) && c.circle.distance(pos) < self.eps)
            .map(Incidence::Circle)
    }

    #[inline]
    pub fn check_nontrivial_incidence(
        &self,
        pos: Vector2<f64>,
        parents: &BTreeSet<String>,
    ) -> bool {
        self.witness(pos, parents).is_some()
    }
}
