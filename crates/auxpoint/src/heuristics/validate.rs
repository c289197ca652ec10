//! Post-hoc audit of a finished pool against the strict tolerances.
//!
//! Nothing here mutates the pool; callers decide what to do with issues.

use std::fmt;

use nalgebra::Vector2;

use super::filter::IncidenceValidator;
use super::types::CandidatePool;
use crate::geom2::{distance, GeomCfg};
use crate::predicate::Predicate;
use crate::snapshot::Snapshot;

#[derive(Clone, Debug, PartialEq)]
pub enum ValidationIssue {
    /// Within `eps_new` of a snapshot point or an earlier candidate.
    Coincident { name: String, with: String },
    /// No unrelated structure within `eps_incidence_val`.
    NoStrictIncidence { name: String },
    /// A synthesized predicate fails numerically.
    PredicateFails { name: String, predicate: Predicate },
    /// A predicate names a point that is neither in the snapshot nor the candidate.
    PredicateUnresolved { name: String, predicate: Predicate },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coincident { name, with } => write!(f, "{name} coincides with {with}"),
            Self::NoStrictIncidence { name } => {
                write!(f, "{name} has no nontrivial incidence at strict tolerance")
            }
            Self::PredicateFails { name, predicate } => {
                write!(f, "{name}: predicate `{predicate}` does not hold")
            }
            Self::PredicateUnresolved { name, predicate } => {
                write!(f, "{name}: predicate `{predicate}` names an unknown point")
            }
        }
    }
}

/// Re-check every candidate: novelty, strict nontrivial incidence, and
/// numeric soundness of its predicates (at `eps_incidence_val`).
pub fn validate_pool(
    pool: &CandidatePool,
    snapshot: &Snapshot,
    cfg: &GeomCfg,
) -> Vec<ValidationIssue> {
    let strict = IncidenceValidator::validation(snapshot, cfg);
    let mut issues = Vec::new();
    for (k, cand) in pool.iter().enumerate() {
        let clash = snapshot
            .points()
            .iter()
            .map(|p| (p.name.as_str(), p.pos))
            .chain(pool.as_slice()[..k].iter().map(|c| (c.name.as_str(), c.pos)))
            .find(|(_, q)| distance(cand.pos, *q) < cfg.eps_new);
        if let Some((with, _)) = clash {
            issues.push(ValidationIssue::Coincident {
                name: cand.name.clone(),
                with: with.to_string(),
            });
        }

        if !strict.check_nontrivial_incidence(cand.pos, &cand.parents) {
            issues.push(ValidationIssue::NoStrictIncidence {
                name: cand.name.clone(),
            });
        }

        let lookup = |n: &str| -> Option<Vector2<f64>> {
            if n == cand.name {
                Some(cand.pos)
            } else {
                snapshot.position(n)
            }
        };
        for pred in &cand.predicates {
            match pred.holds(lookup, cfg.eps_incidence_val) {
                Some(true) => {}
                Some(false) => issues.push(ValidationIssue::PredicateFails {
                    name: cand.name.clone(),
                    predicate: pred.clone(),
                }),
                None => issues.push(ValidationIssue::PredicateUnresolved {
                    name: cand.name.clone(),
                    predicate: pred.clone(),
                }),
            }
        }
    }
    issues
}
