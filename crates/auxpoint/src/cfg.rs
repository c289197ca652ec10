//! Tolerance defaults for candidate generation (internal).
//!
//! Policy
//! - Defaults are fixed constants in normalized problem coordinates. `GeomCfg`
//!   carries them so tests and the CLI can override a single pass without
//!   touching call sites.

/// Two positions closer than this are the same point (novelty gate).
pub(crate) const NEW_EPS: f64 = 5e-4;
/// A position closer than this to a line/circle lies on it (generation).
pub(crate) const INCIDENCE_EPS_GEN: f64 = 5e-4;
/// Stricter incidence threshold used when re-validating a finished pool.
pub(crate) const INCIDENCE_EPS_VAL: f64 = 1e-4;
/// Determinant threshold below which two unit normals count as parallel.
pub(crate) const PARALLEL_EPS: f64 = 1e-12;
/// Slack between center distance and radius that still counts as tangency.
pub(crate) const TANGENT_EPS: f64 = 1e-9;
