//! Per-family counters for auditing and tuning a generation pass.
//!
//! Counting is observational: the generator records into a `Diagnostics`
//! value it owns and nothing downstream reads it back during the pass.

use crate::heuristics::HeuristicKind;

/// Gate funnel of one family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeuristicStats {
    /// Raw points produced.
    pub total: usize,
    /// Passed the novelty gate.
    pub new: usize,
    /// Passed the nontrivial-incidence gate (accepted).
    pub nontrivial: usize,
}

/// Extra detail for the line–circle family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineCircleAudit {
    pub pairs_checked: usize,
    pub pairs_with_intersections: usize,
    pub points_generated: usize,
    pub lines: usize,
    pub circles: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    stats: [HeuristicStats; 5],
    pub line_circle: LineCircleAudit,
}

impl Diagnostics {
    #[inline]
    pub fn stats(&self, kind: HeuristicKind) -> HeuristicStats {
        self.stats[kind.slot()]
    }

    #[inline]
    pub(crate) fn stats_mut(&mut self, kind: HeuristicKind) -> &mut HeuristicStats {
        &mut self.stats[kind.slot()]
    }

    /// Accepted candidates over all families.
    pub fn accepted(&self) -> usize {
        self.stats.iter().map(|s| s.nontrivial).sum()
    }

    /// Emit the funnel table at INFO level.
    pub fn log_summary(&self) {
        for kind in HeuristicKind::GENERATION_ORDER {
            let s = self.stats(kind);
            tracing::info!(
                heuristic = kind.label(),
                total = s.total,
                new = s.new,
                valid = s.nontrivial,
                "candidate funnel"
            );
        }
        let lc = self.line_circle;
        let h2 = self.stats(HeuristicKind::LineCircle);
        tracing::info!(
            pairs_checked = lc.pairs_checked,
            pairs_with_intersections = lc.pairs_with_intersections,
            points_generated = lc.points_generated,
            passed_is_new = h2.new,
            passed_nontrivial = h2.nontrivial,
            lines = lc.lines,
            circles = lc.circles,
            "line-circle audit"
        );
        tracing::info!(accepted = self.accepted(), "candidate total");
    }
}
