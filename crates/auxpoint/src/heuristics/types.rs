//! Candidate and pool types shared by the generator, filters and selector.

use std::collections::BTreeSet;
use std::fmt;

use nalgebra::Vector2;

use crate::predicate::Predicate;
use crate::snapshot::Point;

/// The five rule families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    /// H1: concurrence of three or more lines.
    LineLine,
    /// H2: line–circle intersection.
    LineCircle,
    /// H3: midpoint of two points.
    Midpoint,
    /// H4: reflection of one point through another.
    Reflection,
    /// H5: foot of the perpendicular from a point to a line.
    Foot,
}

impl HeuristicKind {
    /// Fixed per-pass execution order. Later families see earlier families'
    /// accepted candidates in the novelty check, so this order decides which
    /// name wins for near-duplicate positions.
    pub const GENERATION_ORDER: [HeuristicKind; 5] = [
        HeuristicKind::LineLine,
        HeuristicKind::Midpoint,
        HeuristicKind::Reflection,
        HeuristicKind::Foot,
        HeuristicKind::LineCircle,
    ];

    /// Short label `H1`..`H5`.
    pub fn label(self) -> &'static str {
        match self {
            Self::LineLine => "H1",
            Self::LineCircle => "H2",
            Self::Midpoint => "H3",
            Self::Reflection => "H4",
            Self::Foot => "H5",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "H1" => Some(Self::LineLine),
            "H2" => Some(Self::LineCircle),
            "H3" => Some(Self::Midpoint),
            "H4" => Some(Self::Reflection),
            "H5" => Some(Self::Foot),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Self::LineLine => 0,
            Self::LineCircle => 1,
            Self::Midpoint => 2,
            Self::Reflection => 3,
            Self::Foot => 4,
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepted auxiliary point with provenance and justifying predicates.
///
/// Invariants:
/// - every predicate holds numerically at `pos` and the parents' positions;
/// - `parents` names only snapshot points.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub pos: Vector2<f64>,
    pub parents: BTreeSet<String>,
    pub heuristic: HeuristicKind,
    pub predicates: Vec<Predicate>,
}

impl Candidate {
    /// The candidate as a plain named point, ready to be added to a problem.
    pub fn point(&self) -> Point {
        Point {
            name: self.name.clone(),
            pos: self.pos,
        }
    }
}

/// Append-only candidates of one generation pass, in acceptance order.
#[derive(Clone, Debug, Default)]
pub struct CandidatePool {
    entries: Vec<Candidate>,
}

impl CandidatePool {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Candidate] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.entries.iter().find(|c| c.name == name)
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.entries
    }

    pub(crate) fn push(&mut self, c: Candidate) {
        self.entries.push(c);
    }
}

impl<'a> IntoIterator for &'a CandidatePool {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
