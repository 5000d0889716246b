//! Binary exact-match rule for categorical attributes
//!
//! Used for watering frequency, sunlight, soil type, and temperature.
//! Comparison is exact and case-sensitive. Two empty strings are equal, so a
//! query that leaves an attribute unspecified still scores 1 against a
//! record that also leaves it unspecified.

/// 1.0 on exact string equality, 0.0 otherwise.
pub fn exact_match(query: &str, candidate: &str) -> f64 {
    if query == candidate {
        1.0
    } else {
        0.0
    }
}
