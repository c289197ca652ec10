//! Numeric 2D primitives (points, implicit lines, circles).
//!
//! Purpose
//! - Provide the fixed-contract numeric layer the heuristics consume:
//!   distances, midpoints, reflections, perpendicular feet, and line–line /
//!   line–circle intersections.
//! - Keep every tolerance explicit (`GeomCfg`), never hidden in a helper.
//!
//! Points are plain `nalgebra::Vector2<f64>`; names live one layer up in
//! `snapshot`.

mod types;
mod util;

pub use types::{Circle2, GeomCfg, Line2};
pub use util::{
    distance, foot_of_perpendicular, intersect_line_circle, intersect_lines, midpoint,
    reflect_through,
};
