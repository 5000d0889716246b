//! Binary affected-part rule
//!
//! The query names a single plant part; the record carries a set of parts it
//! applies to. Score is 1 when the query part is a member of the record set.
//!
//! An unspecified query part (`""`) never appears in a record's part set, so
//! it scores 0 everywhere rather than being treated specially.

use rustc_hash::FxHashSet;

/// 1.0 if the query's part appears in the record's part set.
pub fn part_match(query_part: &str, candidate_parts: &FxHashSet<String>) -> f64 {
    if candidate_parts.contains(query_part) {
        1.0
    } else {
        0.0
    }
}
