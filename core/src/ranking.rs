use std::sync::Arc;

use nucleo_matcher::Config;
use nucleo_matcher::Matcher;
use nucleo_matcher::Utf32Str;
use nucleo_matcher::pattern;
use nucleo_matcher::pattern::AtomKind;
use nucleo_matcher::pattern::Pattern;
use tracing::debug;

use crate::candidate::Candidate;
use crate::candidate::MatchInfo;
use crate::candidate::ScoredCandidate;
use crate::config::CaseMatching;
use crate::config::Normalization;

/// Scores candidates against a query.
///
/// Implementations must include every candidate when the query is empty
/// (with no match info) and order matches by descending relevance, keeping
/// input order among equal scores.
pub trait Ranker {
    fn rank(&mut self, query: &str, candidates: &[Arc<Candidate>]) -> Vec<ScoredCandidate>;
}

/// Default ranker backed by nucleo-matcher.
pub struct NucleoRanker {
    matcher: Matcher,
    case_matching: CaseMatching,
    normalization: Normalization,
}

impl NucleoRanker {
    pub fn new(case_matching: CaseMatching, normalization: Normalization) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            case_matching,
            normalization,
        }
    }

    /// Every whitespace-separated word is a plain fuzzy atom. Characters such
    /// as `!`, `^`, `'` and `$` are matched literally.
    fn pattern(&self, query: &str) -> Pattern {
        let case = match self.case_matching {
            CaseMatching::Smart => pattern::CaseMatching::Smart,
            CaseMatching::Ignore => pattern::CaseMatching::Ignore,
            CaseMatching::Respect => pattern::CaseMatching::Respect,
        };
        let normalization = match self.normalization {
            Normalization::Smart => pattern::Normalization::Smart,
            Normalization::Never => pattern::Normalization::Never,
        };
        Pattern::new(query, case, normalization, AtomKind::Fuzzy)
    }
}

impl Default for NucleoRanker {
    fn default() -> Self {
        Self::new(CaseMatching::default(), Normalization::default())
    }
}

impl Ranker for NucleoRanker {
    fn rank(&mut self, query: &str, candidates: &[Arc<Candidate>]) -> Vec<ScoredCandidate> {
        if query.is_empty() {
            return candidates
                .iter()
                .map(|candidate| ScoredCandidate::existing(Arc::clone(candidate), None))
                .collect();
        }

        let pattern = self.pattern(query);
        let mut haystack_buf: Vec<char> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut results: Vec<ScoredCandidate> = Vec::new();

        for candidate in candidates {
            indices.clear();
            // One slot per char, so indices line up with `chars()` offsets.
            haystack_buf.clear();
            haystack_buf.extend(candidate.name.chars());
            let haystack = Utf32Str::Unicode(&haystack_buf);
            if let Some(score) = pattern.indices(haystack, &mut self.matcher, &mut indices) {
                results.push(ScoredCandidate::existing(
                    Arc::clone(candidate),
                    Some(MatchInfo::new(score, indices.clone())),
                ));
            }
        }

        // sort_by is stable, so equal scores keep candidate order.
        results.sort_by(|a, b| score_of(b).cmp(&score_of(a)));
        debug!(
            query,
            candidates = candidates.len(),
            matched = results.len(),
            "ranked candidates"
        );
        results
    }
}

fn score_of(row: &ScoredCandidate) -> u32 {
    row.match_info.as_ref().map_or(0, |info| info.score)
}
