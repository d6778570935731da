use std::cmp::Ordering;

use crate::candidate::ScoredCandidate;

/// Moves pinned candidates ahead of fuzzy-ranked ones.
///
/// Pinned rows sort ascending by `order_id`; unpinned rows keep the order
/// they arrived in. Pinning is absolute priority, not a tie-break.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinOrderPolicy;

impl PinOrderPolicy {
    pub fn reorder(self, mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        scored.sort_by(compare);
        scored
    }
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    match (&a.candidate.order_id, &b.candidate.order_id) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn row(candidate: Candidate) -> ScoredCandidate {
        ScoredCandidate::existing(Arc::new(candidate), None)
    }

    fn names(rows: &[ScoredCandidate]) -> Vec<&str> {
        rows.iter().map(ScoredCandidate::name).collect()
    }

    #[test]
    fn pinned_rows_lead_in_key_order() {
        let rows = vec![
            row(Candidate::new("Zeta").with_order_id(2)),
            row(Candidate::new("Alpha016")),
            row(Candidate::new("Yankee").with_order_id(1)),
        ];
        let ordered = PinOrderPolicy.reorder(rows);
        assert_eq!(names(&ordered), vec!["Yankee", "Zeta", "Alpha016"]);
    }

    #[test]
    fn zero_key_is_still_pinned() {
        let rows = vec![
            row(Candidate::new("first")),
            row(Candidate::new("zero").with_order_id(0)),
            row(Candidate::new("blank").with_order_id("")),
        ];
        let ordered = PinOrderPolicy.reorder(rows);
        assert_eq!(names(&ordered), vec!["zero", "blank", "first"]);
    }

    #[test]
    fn unpinned_rows_keep_rank_order() {
        let rows = vec![
            row(Candidate::new("c")),
            row(Candidate::new("a")),
            row(Candidate::new("pin").with_order_id(5)),
            row(Candidate::new("b")),
        ];
        let ordered = PinOrderPolicy.reorder(rows);
        assert_eq!(names(&ordered), vec!["pin", "c", "a", "b"]);
    }

    #[test]
    fn equal_keys_keep_rank_order() {
        let rows = vec![
            row(Candidate::new("second").with_order_id(1)),
            row(Candidate::new("first").with_order_id(1)),
        ];
        let ordered = PinOrderPolicy.reorder(rows);
        assert_eq!(names(&ordered), vec!["second", "first"]);
    }
}
