//! One generation pass: run the families in order through the shared gates.

use nalgebra::Vector2;

use super::families::{propose, Proposal, Roles};
use super::filter::{IncidenceValidator, NoveltyFilter};
use super::synth::synthesize;
use super::types::{Candidate, CandidatePool, HeuristicKind};
use crate::diagnostics::Diagnostics;
use crate::geom2::GeomCfg;
use crate::snapshot::Snapshot;

/// Build the candidate pool for `snapshot`.
pub fn generate(snapshot: &Snapshot, cfg: &GeomCfg) -> CandidatePool {
    generate_audited(snapshot, cfg).0
}

/// Same pass as `generate`, also returning the per-family counters.
pub fn generate_audited(snapshot: &Snapshot, cfg: &GeomCfg) -> (CandidatePool, Diagnostics) {
    let mut runner = Runner::new(snapshot, cfg);
    for kind in HeuristicKind::GENERATION_ORDER {
        runner.run_family(kind);
    }
    tracing::debug!(
        points = snapshot.points().len(),
        lines = snapshot.lines().len(),
        circles = snapshot.circles().len(),
        accepted = runner.pool.len(),
        "candidate generation pass"
    );
    (runner.pool, runner.diag)
}

/// Pass state: borrowed snapshot, gates, the growing pool and counters.
struct Runner<'a> {
    snapshot: &'a Snapshot,
    cfg: GeomCfg,
    novelty: NoveltyFilter<'a>,
    incidence: IncidenceValidator<'a>,
    pool: CandidatePool,
    diag: Diagnostics,
}

impl<'a> Runner<'a> {
    fn new(snapshot: &'a Snapshot, cfg: &GeomCfg) -> Self {
        let mut diag = Diagnostics::default();
        diag.line_circle.lines = snapshot.lines().len();
        diag.line_circle.circles = snapshot.circles().len();
        Self {
            snapshot,
            cfg: *cfg,
            novelty: NoveltyFilter::new(snapshot, cfg),
            incidence: IncidenceValidator::generation(snapshot, cfg),
            pool: CandidatePool::default(),
            diag,
        }
    }

    fn run_family(&mut self, kind: HeuristicKind) {
        let proposals = propose(self.snapshot, kind, &self.cfg);
        if kind == HeuristicKind::LineCircle {
            self.audit_line_circle(&proposals);
        }
        let before = self.pool.len();
        for prop in proposals {
            self.consider(prop);
        }
        tracing::trace!(
            heuristic = kind.label(),
            accepted = self.pool.len() - before,
            "family done"
        );
    }

    fn audit_line_circle(&mut self, proposals: &[Proposal<'a>]) {
        let audit = &mut self.diag.line_circle;
        audit.pairs_checked += self.snapshot.lines().len() * self.snapshot.circles().len();
        audit.points_generated += proposals.len();
        let mut last = None;
        for prop in proposals {
            if let Roles::LineCircle {
                line_idx,
                circle_idx,
                ..
            } = prop.roles
            {
                if last != Some((line_idx, circle_idx)) {
                    audit.pairs_with_intersections += 1;
                    last = Some((line_idx, circle_idx));
                }
            }
        }
    }

    /// Gate order: novelty, (H1 only) supporting third line, nontrivial incidence.
    fn consider(&mut self, prop: Proposal<'a>) {
        let kind = prop.roles.kind();
        self.diag.stats_mut(kind).total += 1;
        if !self.novelty.is_new(prop.pos, &self.pool) {
            return;
        }
        self.diag.stats_mut(kind).new += 1;
        if let Roles::LineLine { i, j, .. } = prop.roles {
            if !self.has_supporting_line(prop.pos, i, j) {
                return;
            }
        }
        let parents = prop.roles.parents();
        if !self.incidence.check_nontrivial_incidence(prop.pos, &parents) {
            return;
        }
        self.diag.stats_mut(kind).nontrivial += 1;

        let name = self.fresh_name(&prop.roles);
        let predicates = synthesize(&name, &prop.roles);
        tracing::trace!(
            %name,
            heuristic = kind.label(),
            x = prop.pos.x,
            y = prop.pos.y,
            "accepted"
        );
        self.pool.push(Candidate {
            name,
            pos: prop.pos,
            parents,
            heuristic: kind,
            predicates,
        });
    }

    /// A line other than the crossing pair `i`, `j` also passes through `pos`.
    fn has_supporting_line(&self, pos: Vector2<f64>, i: usize, j: usize) -> bool {
        self.snapshot
            .lines()
            .iter()
            .enumerate()
            .any(|(k, l)| k != i && k != j && l.line.distance(pos) < self.cfg.eps_incidence_gen)
    }

    /// Name from the roles, suffixed if it would shadow a snapshot point or an
    /// earlier candidate.
    fn fresh_name(&self, roles: &Roles<'_>) -> String {
        let stem = roles.name(self.pool.len());
        let taken = |n: &str| self.snapshot.point(n).is_some() || self.pool.get(n).is_some();
        if !taken(&stem) {
            return stem;
        }
        let mut k = 1;
        loop {
            let name = format!("{stem}_{k}");
            if !taken(&name) {
                return name;
            }
            k += 1;
        }
    }
}
