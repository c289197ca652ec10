//! Weighted pick from a candidate pool, favoring untried constructions.
//!
//! The tried set belongs to the caller (one per problem-solving session) and
//! the random source is injected, so a seeded `StdRng` makes picks
//! reproducible.

use std::collections::HashSet;

use rand::Rng;

use crate::heuristics::Candidate;

/// Selection weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectCfg {
    pub weight_untried: u32,
    pub weight_tried: u32,
}

impl Default for SelectCfg {
    fn default() -> Self {
        Self {
            weight_untried: 3,
            weight_tried: 1,
        }
    }
}

/// Names of candidates already handed to the prover in this session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriedSet {
    names: HashSet<String>,
}

impl TriedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pick; returns false if it was already tried.
    pub fn mark(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TriedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for TriedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

/// Weighted random selection over an accepted pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct CandidateSelector {
    pub cfg: SelectCfg,
}

impl CandidateSelector {
    pub fn new(cfg: SelectCfg) -> Self {
        Self { cfg }
    }

    #[inline]
    pub fn weight(&self, cand: &Candidate, tried: &TriedSet) -> u64 {
        if tried.contains(&cand.name) {
            u64::from(self.cfg.weight_tried)
        } else {
            u64::from(self.cfg.weight_untried)
        }
    }

    /// Draw `r ∈ [0, total)` and return the first candidate whose cumulative
    /// weight reaches `r`. Empty pool → None; zero total weight → uniform pick.
    pub fn select<'p, R: Rng>(
        &self,
        pool: &'p [Candidate],
        tried: &TriedSet,
        rng: &mut R,
    ) -> Option<&'p Candidate> {
        if pool.is_empty() {
            return None;
        }
        let weights: Vec<u64> = pool.iter().map(|c| self.weight(c, tried)).collect();
        let total: u64 = weights.iter().sum();
        if total == 0 {
            return pool.get(rng.gen_range(0..pool.len()));
        }
        let r = rng.gen_range(0.0..total as f64);
        let mut cumulative = 0.0;
        for (cand, w) in pool.iter().zip(&weights) {
            cumulative += *w as f64;
            if *w > 0 && cumulative >= r {
                return Some(cand);
            }
        }
        pool.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::HeuristicKind;
    use nalgebra::Vector2;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;

    fn cand(name: &str) -> Candidate {
        Candidate {
            name: name.into(),
            pos: Vector2::zeros(),
            parents: BTreeSet::new(),
            heuristic: HeuristicKind::Midpoint,
            predicates: vec![],
        }
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let sel = CandidateSelector::default();
        assert!(sel.select(&[], &TriedSet::new(), &mut rng).is_none());
    }

    #[test]
    fn untried_wins_three_quarters_of_draws() {
        let pool = vec![cand("fresh"), cand("old")];
        let tried: TriedSet = ["old"].into_iter().collect();
        let sel = CandidateSelector::default();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let hits = (0..n)
            .filter(|_| {
                sel.select(&pool, &tried, &mut rng).map(|c| c.name.as_str()) == Some("fresh")
            })
            .count();
        let freq = hits as f64 / n as f64;
        assert!((freq - 0.75).abs() < 0.02, "freq = {freq}");
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let pool = vec![cand("a"), cand("b"), cand("c")];
        let sel = CandidateSelector::new(SelectCfg {
            weight_untried: 0,
            weight_tried: 0,
        });
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            let c = sel.select(&pool, &TriedSet::new(), &mut rng).expect("non-empty");
            seen.insert(c.name.clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn zero_weight_candidates_are_skipped_when_others_weigh() {
        let pool = vec![cand("done"), cand("next")];
        let sel = CandidateSelector::new(SelectCfg {
            weight_untried: 1,
            weight_tried: 0,
        });
        let mut tried = TriedSet::new();
        assert!(tried.mark("done"));
        assert!(!tried.mark("done"));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(sel.select(&pool, &tried, &mut rng).unwrap().name, "next");
        }
    }
}
