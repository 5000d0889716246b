//! Plant Diagnosis Rust Implementation
//!
//! Rule-based diagnosis matching for a plant-care backend:
//! - `catalog/`: problem catalog loading and normalization
//! - `metrics/`: per-attribute match rules (sub-scores in [0, 1])
//! - `scorer/`: weighted aggregation and top-1 selection with a
//!   confidence threshold
//! - `recommend/`: static plant-recommendation lookup
//!
//! The matcher is a pure function of (query, catalog snapshot): no I/O, no
//! shared mutable state, safe to call concurrently. The optional `api`
//! feature adds the Axum HTTP surface that fronts both the matcher and the
//! recommendation lookup.

pub mod catalog;
pub mod metrics;
pub mod recommend;
pub mod scorer;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{Catalog, Condition, ProblemRecord};
pub use recommend::{PlantRecommendation, RecommendationCatalog, RecommendationFilters};
pub use scorer::{
    score_condition, DiagnosisMatcher, DiagnosisQuery, MatchResult, Weights,
    CONFIDENCE_THRESHOLD,
};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
