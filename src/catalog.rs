//! Problem Catalog Loading and Data Model
//!
//! Loads the plant-problem catalog from its JSON source and normalizes it
//! into the in-memory form the scorer consumes. The catalog is loaded once
//! and held immutable for the life of the process; every matching pass reads
//! the same snapshot.
//!
//! Source format quirk: `problemPart` is sometimes a single string and
//! sometimes a list. It is normalized to a set here, at load time, so the
//! scorer never has to special-case it.

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// Observable condition attached to a catalog record.
///
/// Set-valued attributes are deduplicated `FxHashSet`s; categorical
/// attributes are plain strings where `""` means "unspecified".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    /// Affected plant parts ("leaf", "root", ...). String-or-list in the
    /// source data, always a set here.
    #[serde(deserialize_with = "string_or_list")]
    pub problem_part: FxHashSet<String>,
    pub symptoms: FxHashSet<String>,
    pub watering_frequency: String,
    pub sunlight: String,
    pub soil_type: String,
    pub temperature: String,
    /// Growing materials / substrate.
    pub materials: FxHashSet<String>,
    pub fertilizers: FxHashSet<String>,
}

/// One catalog entry: a known problem with its observable condition and the
/// human-readable verdict fields copied into a match result.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemRecord {
    pub id: i64,
    pub condition: Condition,
    pub diagnosis: String,
    pub solution: String,
    pub severity: String,
}

/// Accept `"leaf"` or `["leaf", "stem"]` for the same field.
fn string_or_list<'de, D>(deserializer: D) -> Result<FxHashSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PartField {
        Single(String),
        Multiple(Vec<String>),
    }

    Ok(match PartField::deserialize(deserializer)? {
        PartField::Single(part) => std::iter::once(part).collect(),
        PartField::Multiple(parts) => parts.into_iter().collect(),
    })
}

/// Top-level shape of the catalog data file.
#[derive(Deserialize)]
struct CatalogFile {
    tree_diagnosis_responses: Vec<ProblemRecord>,
}

/// Read-only set of problem records, validated on construction.
///
/// Iteration order is the order records appear in the source file; the
/// matcher's tie-break depends on it being stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProblemRecord>,
}

impl Catalog {
    /// Load and validate the catalog from a JSON data file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

        let file: CatalogFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse catalog JSON: {:?}", path))?;

        Self::from_records(file.tree_diagnosis_responses)
    }

    /// Build a catalog from already-deserialized records (used by tests and
    /// by callers that source records elsewhere). Validates the same
    /// invariants as [`Catalog::load`].
    pub fn from_records(records: Vec<ProblemRecord>) -> Result<Self> {
        let mut seen_ids = FxHashSet::default();

        for record in &records {
            if !seen_ids.insert(record.id) {
                bail!("Duplicate record id {} in catalog", record.id);
            }
            if record.diagnosis.is_empty() {
                bail!("Record {} has an empty diagnosis", record.id);
            }
            if record.solution.is_empty() {
                bail!("Record {} has an empty solution", record.id);
            }
            if record.severity.is_empty() {
                bail!("Record {} has an empty severity", record.id);
            }
        }

        Ok(Self { records })
    }

    /// Records in source-file order.
    pub fn records(&self) -> &[ProblemRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
