//! Set-overlap rule for symptoms, materials, and fertilizers
//!
//! Sub-score is `|query ∩ record| / max(|query|, |record|)`.
//!
//! The denominator choice matters: with `max`, a record carrying many more
//! entries than the query is not penalized for its extras, while a query
//! listing far more entries than any one record shrinks the ratio. This is
//! deliberately not Jaccard (union) and not query-only normalization.
//!
//! If either side is empty the score is 0, not skipped. Missing data is
//! penalized rather than renormalized away; callers rely on the total
//! attribute weight staying constant across records.

use rustc_hash::FxHashSet;

/// Overlap ratio of two string sets, 0.0 when either is empty.
pub fn overlap_ratio(query: &FxHashSet<String>, candidate: &FxHashSet<String>) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }

    // Probe the larger set with the smaller one
    let (small, large) = if query.len() <= candidate.len() {
        (query, candidate)
    } else {
        (candidate, query)
    };
    let shared = small.iter().filter(|item| large.contains(*item)).count();

    shared as f64 / query.len().max(candidate.len()) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> FxHashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_sets_score_one() {
        let symptoms = set(&["yellowing", "wilting"]);
        assert_eq!(overlap_ratio(&symptoms, &symptoms), 1.0);
    }

    #[test]
    fn disjoint_sets_score_zero() {
        assert_eq!(overlap_ratio(&set(&["rot"]), &set(&["wilting"])), 0.0);
    }

    #[test]
    fn empty_side_scores_zero_not_skip() {
        assert_eq!(overlap_ratio(&set(&[]), &set(&["rot"])), 0.0);
        assert_eq!(overlap_ratio(&set(&["rot"]), &set(&[])), 0.0);
        assert_eq!(overlap_ratio(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn denominator_is_larger_set_size() {
        // Record has extras beyond the query: 1 shared / max(1, 3)
        let query = set(&["rot"]);
        let record = set(&["rot", "spots", "mold"]);
        assert_eq!(overlap_ratio(&query, &record), 1.0 / 3.0);

        // Symmetric: oversized query is penalized the same way
        assert_eq!(overlap_ratio(&record, &query), 1.0 / 3.0);
    }

    #[test]
    fn partial_overlap() {
        let query = set(&["yellowing", "wilting", "spots"]);
        let record = set(&["yellowing", "wilting", "curling"]);
        assert_eq!(overlap_ratio(&query, &record), 2.0 / 3.0);
    }
}
