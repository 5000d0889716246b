//! Attribute match rules for diagnosis scoring
//!
//! Each rule compares one query attribute against the corresponding record
//! attribute and returns a sub-score in [0, 1]. The aggregate scorer in
//! `scorer.rs` combines them with the documented weight table.

pub mod exact_match;
pub mod overlap;
pub mod part_match;

// Re-export match rules
pub use exact_match::exact_match;
pub use overlap::overlap_ratio;
pub use part_match::part_match;
