//! Curated surface for the outer search loop.
//!
//! One call per step of the loop: build a `Snapshot` from the engine, run a
//! pass, pick a candidate, remember it. Everything else stays reachable
//! through the modules.

pub use crate::diagnostics::{Diagnostics, HeuristicStats, LineCircleAudit};
pub use crate::geom2::{Circle2, GeomCfg, Line2};
pub use crate::heuristics::{
    generate, generate_audited, validate_pool, Candidate, CandidatePool, HeuristicKind,
    ValidationIssue,
};
pub use crate::predicate::{Predicate, PredicateKind};
pub use crate::select::{CandidateSelector, SelectCfg, TriedSet};
pub use crate::snapshot::{DefinedCircle, DefinedLine, Point, Snapshot, SnapshotError};

use rand::Rng;

/// Pass + pick in one go: generate for `snapshot`, select with `tried`, and
/// mark the pick as tried. Returns the chosen candidate (owned) if any.
pub fn propose_next<R: Rng>(
    snapshot: &Snapshot,
    cfg: &GeomCfg,
    select: SelectCfg,
    tried: &mut TriedSet,
    rng: &mut R,
) -> Option<Candidate> {
    let pool = generate(snapshot, cfg);
    let pick = CandidateSelector::new(select)
        .select(pool.as_slice(), tried, rng)?
        .clone();
    tried.mark(pick.name.clone());
    tracing::debug!(
        name = %pick.name,
        heuristic = pick.heuristic.label(),
        pool = pool.len(),
        "picked"
    );
    Some(pick)
}
