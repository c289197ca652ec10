//! Raw enumeration for the five rule families (no filtering).
//!
//! Each family turns a snapshot into `Proposal`s: a position plus the roles it
//! was built from. Roles feed three later steps: construction parents, the
//! candidate name, and predicate synthesis.

use std::collections::BTreeSet;

use nalgebra::Vector2;

use super::types::HeuristicKind;
use crate::geom2::{
    foot_of_perpendicular, intersect_line_circle, intersect_lines, midpoint, reflect_through,
    GeomCfg,
};
use crate::snapshot::{DefinedCircle, DefinedLine, Point, Snapshot};

/// Inputs a proposal was derived from.
#[derive(Clone, Copy, Debug)]
pub enum Roles<'a> {
    LineLine {
        i: usize,
        j: usize,
        a: &'a DefinedLine,
        b: &'a DefinedLine,
    },
    LineCircle {
        line_idx: usize,
        circle_idx: usize,
        line: &'a DefinedLine,
        circle: &'a DefinedCircle,
    },
    Midpoint {
        p1: &'a Point,
        p2: &'a Point,
    },
    Reflection {
        p: &'a Point,
        center: &'a Point,
    },
    Foot {
        p: &'a Point,
        line: &'a DefinedLine,
    },
}

impl<'a> Roles<'a> {
    pub fn kind(&self) -> HeuristicKind {
        match self {
            Roles::LineLine { .. } => HeuristicKind::LineLine,
            Roles::LineCircle { .. } => HeuristicKind::LineCircle,
            Roles::Midpoint { .. } => HeuristicKind::Midpoint,
            Roles::Reflection { .. } => HeuristicKind::Reflection,
            Roles::Foot { .. } => HeuristicKind::Foot,
        }
    }

    /// Names of the existing points used directly by the construction.
    pub fn parents(&self) -> BTreeSet<String> {
        match *self {
            Roles::LineLine { a, b, .. } => a.points.iter().chain(&b.points).cloned().collect(),
            Roles::LineCircle { line, circle, .. } => {
                line.points.iter().chain(&circle.points).cloned().collect()
            }
            Roles::Midpoint { p1, p2 } => BTreeSet::from([p1.name.clone(), p2.name.clone()]),
            Roles::Reflection { p, center } => {
                BTreeSet::from([p.name.clone(), center.name.clone()])
            }
            Roles::Foot { p, line } => line
                .points
                .iter()
                .chain(std::iter::once(&p.name))
                .cloned()
                .collect(),
        }
    }

    /// Human-readable name; `index` disambiguates the intersection families.
    pub fn name(&self, index: usize) -> String {
        match *self {
            Roles::LineLine { .. } => format!("H_inter_LL_{index}"),
            Roles::LineCircle { .. } => format!("H_inter_LC_{index}"),
            Roles::Midpoint { p1, p2 } => format!("H_mid_{}_{}", p1.name, p2.name),
            Roles::Reflection { p, center } => format!("H_ref_{}_{}", p.name, center.name),
            Roles::Foot { p, line } => {
                let mut sorted: Vec<&str> = line.points.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                sorted.truncate(2);
                format!("H_foot_{}_on_{}", p.name, sorted.join("_"))
            }
        }
    }
}

/// Raw point produced by a family before any gate runs.
#[derive(Clone, Copy, Debug)]
pub struct Proposal<'a> {
    pub pos: Vector2<f64>,
    pub roles: Roles<'a>,
}

/// Enumerate one family over the snapshot, in its deterministic order.
pub fn propose<'a>(
    snapshot: &'a Snapshot,
    kind: HeuristicKind,
    cfg: &GeomCfg,
) -> Vec<Proposal<'a>> {
    match kind {
        HeuristicKind::LineLine => line_line(snapshot, cfg),
        HeuristicKind::LineCircle => line_circle(snapshot, cfg),
        HeuristicKind::Midpoint => midpoints(snapshot),
        HeuristicKind::Reflection => reflections(snapshot),
        HeuristicKind::Foot => feet(snapshot),
    }
}

/// H1: every unordered pair of lines that is not parallel.
fn line_line<'a>(snapshot: &'a Snapshot, cfg: &GeomCfg) -> Vec<Proposal<'a>> {
    let lines = snapshot.lines();
    let mut out = Vec::new();
    for (i, a) in lines.iter().enumerate() {
        for (j, b) in lines.iter().enumerate().skip(i + 1) {
            if let Some(pos) = intersect_lines(&a.line, &b.line, cfg.eps_parallel) {
                out.push(Proposal {
                    pos,
                    roles: Roles::LineLine { i, j, a, b },
                });
            }
        }
    }
    out
}

/// H2: lines outer, circles inner; 0–2 points per pair.
fn line_circle<'a>(snapshot: &'a Snapshot, cfg: &GeomCfg) -> Vec<Proposal<'a>> {
    let mut out = Vec::new();
    for (line_idx, line) in snapshot.lines().iter().enumerate() {
        for (circle_idx, circle) in snapshot.circles().iter().enumerate() {
            for pos in intersect_line_circle(&line.line, &circle.circle, cfg.eps_tangent) {
                out.push(Proposal {
                    pos,
                    roles: Roles::LineCircle {
                        line_idx,
                        circle_idx,
                        line,
                        circle,
                    },
                });
            }
        }
    }
    out
}

/// H3: every unordered pair of points.
fn midpoints(snapshot: &Snapshot) -> Vec<Proposal<'_>> {
    let pts = snapshot.points();
    let mut out = Vec::with_capacity(pts.len() * pts.len().saturating_sub(1) / 2);
    for (i, p1) in pts.iter().enumerate() {
        for p2 in &pts[i + 1..] {
            out.push(Proposal {
                pos: midpoint(p1.pos, p2.pos),
                roles: Roles::Midpoint { p1, p2 },
            });
        }
    }
    out
}

/// H4: every ordered pair of distinct points; `p` is mirrored through `center`.
fn reflections(snapshot: &Snapshot) -> Vec<Proposal<'_>> {
    let pts = snapshot.points();
    let mut out = Vec::new();
    for p in pts {
        for center in pts {
            if p.name == center.name {
                continue;
            }
            out.push(Proposal {
                pos: reflect_through(p.pos, center.pos),
                roles: Roles::Reflection { p, center },
            });
        }
    }
    out
}

/// H5: every (point, line) pair.
fn feet(snapshot: &Snapshot) -> Vec<Proposal<'_>> {
    let mut out = Vec::new();
    for p in snapshot.points() {
        for line in snapshot.lines() {
            out.push(Proposal {
                pos: foot_of_perpendicular(p.pos, &line.line),
                roles: Roles::Foot { p, line },
            });
        }
    }
    out
}
