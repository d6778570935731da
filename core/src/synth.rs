use crate::candidate::Candidate;
use crate::candidate::ScoredCandidate;
use crate::config::ExactMatchPolicy;
use crate::config::PickerConfig;

/// Appends the "create new" row built from the query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntrySynthesizer {
    allow_new: bool,
    new_hint: Option<String>,
    exact_match: ExactMatchPolicy,
}

impl NewEntrySynthesizer {
    pub fn new(allow_new: bool, new_hint: Option<String>, exact_match: ExactMatchPolicy) -> Self {
        Self {
            allow_new,
            new_hint,
            exact_match,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(
            config.allow_new,
            config.new_hint.clone(),
            config.exact_match,
        )
    }

    /// Under `AlwaysAppend` the row is added even for an empty query and
    /// even when an existing result already carries the query as its name.
    pub fn augment(&self, query: &str, results: &mut Vec<ScoredCandidate>) {
        if !self.allow_new {
            return;
        }
        if self.exact_match == ExactMatchPolicy::SkipExactMatch
            && results.iter().any(|row| row.name() == query)
        {
            return;
        }

        let mut entry = Candidate::new(query);
        entry.hint = self.new_hint.clone();
        results.push(ScoredCandidate::synthetic(entry));
    }
}
