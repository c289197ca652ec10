//! Auxiliary point heuristics: rule families, gates, synthesis.
//!
//! Purpose
//! - Propose new points an automated prover cannot invent by itself, keeping
//!   only those that expose a coincidence the prover does not already know.
//!
//! Pipeline (per pass)
//! - `families`: raw proposals for H1 (line–line), H2 (line–circle),
//!   H3 (midpoint), H4 (reflection), H5 (perpendicular foot).
//! - `filter`: novelty against snapshot points and the growing pool, then
//!   nontrivial incidence against lines/circles unrelated to the construction
//!   parents. H1 additionally needs a third concurrent line.
//! - `synth`: predicates justifying each accepted point.
//! - `generate`: runs the families in `HeuristicKind::GENERATION_ORDER`.
//! - `validate`: strict post-hoc audit of a finished pool.
//!
//! A pass is a pure function of its `Snapshot`; nothing fails, the worst case
//! is an empty pool.

mod families;
mod filter;
mod generate;
mod synth;
mod types;
mod validate;

pub use families::{propose, Proposal, Roles};
pub use filter::{Incidence, IncidenceValidator, NoveltyFilter};
pub use generate::{generate, generate_audited};
pub use synth::synthesize;
pub use types::{Candidate, CandidatePool, HeuristicKind};
pub use validate::{validate_pool, ValidationIssue};

#[cfg(test)]
mod tests;
