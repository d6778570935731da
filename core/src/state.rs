use std::sync::Arc;

use tracing::debug;

use crate::candidate::Candidate;
use crate::candidate::ScoredCandidate;
use crate::pin::PinOrderPolicy;
use crate::ranking::Ranker;
use crate::synth::NewEntrySynthesizer;

/// Query text, ranked rows and the highlighted row.
///
/// `highlighted` is kept inside `0..results.len()` whenever there are
/// results. Every recomputation resets it to the first row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    query: String,
    results: Vec<ScoredCandidate>,
    highlighted: usize,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[ScoredCandidate] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// `None` when there is nothing to highlight.
    pub fn highlighted_index(&self) -> Option<usize> {
        if self.results.is_empty() {
            None
        } else {
            Some(self.highlighted)
        }
    }

    pub fn highlighted(&self) -> Option<&ScoredCandidate> {
        self.results.get(self.highlighted)
    }

    pub fn get(&self, index: usize) -> Option<&ScoredCandidate> {
        self.results.get(index)
    }

    /// Rank, pin, then synthesize against `query`.
    pub(crate) fn recompute<R: Ranker + ?Sized>(
        &mut self,
        query: String,
        candidates: &[Arc<Candidate>],
        ranker: &mut R,
        synthesizer: &NewEntrySynthesizer,
    ) {
        let ranked = ranker.rank(&query, candidates);
        let mut results = PinOrderPolicy.reorder(ranked);
        synthesizer.augment(&query, &mut results);
        debug!(query = %query, results = results.len(), "recomputed search state");
        self.query = query;
        self.results = results;
        self.highlighted = 0;
    }

    pub(crate) fn move_up(&mut self, step: usize) {
        self.highlighted = self.highlighted.saturating_sub(step);
    }

    pub(crate) fn move_down(&mut self, step: usize) {
        let max_index = self.results.len().saturating_sub(1);
        self.highlighted = self.highlighted.saturating_add(step).min(max_index);
    }

    pub(crate) fn set_highlighted(&mut self, index: usize) {
        if self.results.is_empty() {
            return;
        }
        self.highlighted = index.min(self.results.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExactMatchPolicy;
    use crate::ranking::NucleoRanker;
    use pretty_assertions::assert_eq;

    fn state_for(query: &str, names: &[&str]) -> SearchState {
        let candidates: Vec<Arc<Candidate>> = names
            .iter()
            .map(|name| Arc::new(Candidate::new(*name)))
            .collect();
        let mut state = SearchState::default();
        state.recompute(
            query.to_string(),
            &candidates,
            &mut NucleoRanker::default(),
            &NewEntrySynthesizer::default(),
        );
        state
    }

    #[test]
    fn empty_state_has_no_highlight() {
        let state = state_for("zzz", &["alpha"]);
        assert!(state.is_empty());
        assert_eq!(state.highlighted_index(), None);
        assert!(state.highlighted().is_none());
    }

    #[test]
    fn moves_are_clamped() {
        let mut state = state_for("", &["a", "b", "c"]);
        state.move_up(1);
        assert_eq!(state.highlighted_index(), Some(0));
        state.move_down(10);
        assert_eq!(state.highlighted_index(), Some(2));
        state.move_down(1);
        assert_eq!(state.highlighted_index(), Some(2));
        state.move_up(usize::MAX);
        assert_eq!(state.highlighted_index(), Some(0));
    }

    #[test]
    fn set_highlighted_clamps_and_ignores_empty() {
        let mut state = state_for("", &["a", "b"]);
        state.set_highlighted(7);
        assert_eq!(state.highlighted_index(), Some(1));

        let mut empty = state_for("q", &[]);
        empty.set_highlighted(3);
        assert_eq!(empty.highlighted_index(), None);
    }

    #[test]
    fn recompute_resets_highlight_and_places_synthetic_last() {
        let candidates = vec![
            Arc::new(Candidate::new("bar baz")),
            Arc::new(Candidate::new("pinned bar").with_order_id(1)),
        ];
        let synth = NewEntrySynthesizer::new(true, None, ExactMatchPolicy::AlwaysAppend);
        let mut ranker = NucleoRanker::default();
        let mut state = SearchState::default();

        state.recompute("bar".to_string(), &candidates, &mut ranker, &synth);
        state.move_down(2);
        assert_eq!(state.highlighted_index(), Some(2));

        state.recompute("ba".to_string(), &candidates, &mut ranker, &synth);
        assert_eq!(state.highlighted_index(), Some(0));
        let names: Vec<&str> = state.results().iter().map(ScoredCandidate::name).collect();
        assert_eq!(names, vec!["pinned bar", "bar baz", "ba"]);
        assert!(state.results()[2].is_synthetic());
    }
}
