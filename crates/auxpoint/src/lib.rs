//! Auxiliary construction points for synthetic geometry provers.
//!
//! A prover working from deduction closure alone never introduces points. This
//! crate proposes new ones from the current state (points, lines, circles),
//! keeps those that reveal a coincidence not implied by their own
//! construction, and re-expresses each as predicates the prover can assert.
//!
//! Layout
//! - `geom2`: numeric primitives and tolerances.
//! - `snapshot`: validated, read-only problem state.
//! - `predicate`: fact vocabulary (`coll`, `cong`, `perp`, `midp`).
//! - `heuristics`: rule families H1–H5, gates, synthesis, validation.
//! - `select`: weighted pick favoring untried candidates.
//! - `diagnostics`: per-family funnel counters.

pub mod api;
mod cfg;
pub mod diagnostics;
pub mod geom2;
pub mod heuristics;
pub mod predicate;
pub mod select;
pub mod snapshot;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::GeomCfg;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::diagnostics::{Diagnostics, HeuristicStats};
    pub use crate::geom2::{Circle2, GeomCfg, Line2};
    pub use crate::heuristics::{
        generate, generate_audited, validate_pool, Candidate, CandidatePool, HeuristicKind,
    };
    pub use crate::predicate::{Predicate, PredicateKind};
    pub use crate::select::{CandidateSelector, SelectCfg, TriedSet};
    pub use crate::snapshot::{DefinedCircle, DefinedLine, Point, Snapshot, SnapshotError};
    pub use nalgebra::Vector2 as Vec2;
}
