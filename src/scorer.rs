//! Diagnosis Scorer - weighted matching of queries against the catalog
//!
//! Scores every catalog record against a symptom query and returns the
//! best match above the confidence threshold. Includes both sequential and
//! parallel (Rayon) implementations.
//!
//! Weight table (fixed denominators, every attribute always scored):
//!
//! | Attribute          | Weight | Rule                                 |
//! |--------------------|--------|--------------------------------------|
//! | affected part      | 2      | binary: query part ∈ record part set |
//! | symptoms           | 3      | overlap ratio, max-denominator       |
//! | watering frequency | 1      | exact string equality                |
//! | sunlight           | 1      | exact string equality                |
//! | soil type          | 1      | exact string equality                |
//! | temperature        | 1      | exact string equality                |
//! | materials          | 1      | overlap ratio, max-denominator       |
//! | fertilizers        | 1      | overlap ratio, max-denominator       |
//!
//! Affected part and symptom overlap are the primary diagnostic signals;
//! the environmental attributes are secondary corroboration. The aggregate
//! is the weighted sum divided by the total weight (11 by default), so
//! every score lands in [0, 1].

use crate::catalog::{Catalog, Condition, ProblemRecord};
use crate::metrics::{exact_match, overlap_ratio, part_match};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Minimum aggregate score required to report a match.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Caller-supplied description of observed plant conditions.
///
/// Wire names match the request payload (`problemPart`, ...). Every field
/// is optional on the wire; absent fields deserialize to empty, and empty
/// fields simply fail to match populated record attributes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosisQuery {
    pub problem_part: String,
    pub symptoms: FxHashSet<String>,
    pub watering_frequency: String,
    pub sunlight: String,
    pub soil_type: String,
    pub temperature: String,
    pub materials: FxHashSet<String>,
    pub fertilizers: FxHashSet<String>,
}

/// Verdict copied from the winning record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub diagnosis: String,
    pub solution: String,
    pub severity: String,
}

impl From<&ProblemRecord> for MatchResult {
    fn from(record: &ProblemRecord) -> Self {
        Self {
            diagnosis: record.diagnosis.clone(),
            solution: record.solution.clone(),
            severity: record.severity.clone(),
        }
    }
}

/// Per-attribute weights. The defaults are the documented table above;
/// tests and future tuning can supply their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub affected_part: f64,
    pub symptoms: f64,
    pub watering_frequency: f64,
    pub sunlight: f64,
    pub soil_type: f64,
    pub temperature: f64,
    pub materials: f64,
    pub fertilizers: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            affected_part: 2.0,
            symptoms: 3.0,
            watering_frequency: 1.0,
            sunlight: 1.0,
            soil_type: 1.0,
            temperature: 1.0,
            materials: 1.0,
            fertilizers: 1.0,
        }
    }
}

impl Weights {
    /// Sum of all attribute weights (the score denominator).
    pub fn total(&self) -> f64 {
        self.affected_part
            + self.symptoms
            + self.watering_frequency
            + self.sunlight
            + self.soil_type
            + self.temperature
            + self.materials
            + self.fertilizers
    }
}

/// Aggregate score of one record's condition against a query, in [0, 1].
///
/// All eight attributes are always scored; empty sets score 0 on their
/// attribute rather than being skipped, so sparse queries are penalized
/// across the board. Unrecognized categorical strings degrade the score
/// instead of erroring.
pub fn score_condition(query: &DiagnosisQuery, condition: &Condition, weights: &Weights) -> f64 {
    let total = weights.total();
    if total == 0.0 {
        return 0.0;
    }

    let mut score = 0.0;
    score += weights.affected_part * part_match(&query.problem_part, &condition.problem_part);
    score += weights.symptoms * overlap_ratio(&query.symptoms, &condition.symptoms);
    score += weights.watering_frequency
        * exact_match(&query.watering_frequency, &condition.watering_frequency);
    score += weights.sunlight * exact_match(&query.sunlight, &condition.sunlight);
    score += weights.soil_type * exact_match(&query.soil_type, &condition.soil_type);
    score += weights.temperature * exact_match(&query.temperature, &condition.temperature);
    score += weights.materials * overlap_ratio(&query.materials, &condition.materials);
    score += weights.fertilizers * overlap_ratio(&query.fertilizers, &condition.fertilizers);

    score / total
}

/// Main diagnosis matcher.
///
/// Owns its catalog snapshot (constructor injection, never a process-wide
/// handle) and is stateless across calls: any number of concurrent
/// invocations may score against the same matcher without synchronization.
pub struct DiagnosisMatcher {
    catalog: Catalog,
    weights: Weights,
    threshold: f64,
}

impl DiagnosisMatcher {
    /// Matcher with the documented weight table and the 0.6 threshold.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, Weights::default(), CONFIDENCE_THRESHOLD)
    }

    /// Matcher with a custom weight table and threshold.
    pub fn with_config(catalog: Catalog, weights: Weights, threshold: f64) -> Self {
        Self {
            catalog,
            weights,
            threshold,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Score every record and return the best match above the threshold.
    ///
    /// Ties resolve first-seen-wins: the strictly-greater comparison keeps
    /// the earliest record at any given score, so output is deterministic
    /// for a fixed catalog order. An empty catalog yields no match (the
    /// sentinel starts below any achievable score).
    pub fn best_match(&self, query: &DiagnosisQuery) -> Option<MatchResult> {
        let mut best: Option<&ProblemRecord> = None;
        let mut highest = -1.0_f64;

        for record in self.catalog.records() {
            let score = score_condition(query, &record.condition, &self.weights);
            if score > highest {
                highest = score;
                best = Some(record);
            }
        }

        if highest >= self.threshold {
            best.map(MatchResult::from)
        } else {
            None
        }
    }

    /// Parallel variant of [`best_match`](Self::best_match).
    ///
    /// Scores records across Rayon worker threads. The reduction compares
    /// (score, index) so equal scores still resolve to the earliest record,
    /// keeping the output identical to the sequential scan.
    pub fn best_match_parallel(&self, query: &DiagnosisQuery) -> Option<MatchResult> {
        let best = self
            .catalog
            .records()
            .par_iter()
            .enumerate()
            .map(|(idx, record)| {
                (idx, score_condition(query, &record.condition, &self.weights), record)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(&a.0)));

        match best {
            Some((_, score, record)) if score >= self.threshold => Some(record.into()),
            _ => None,
        }
    }
}
