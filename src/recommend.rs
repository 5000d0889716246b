//! Static plant-recommendation lookup
//!
//! A read-only list of recommendation records loaded from JSON, filtered by
//! exact scalar match, list membership, and case-insensitive substring on
//! names/tags. No scoring here; this is a plain lookup the API layer caches.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Growing conditions a recommended plant tolerates.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlantConditions {
    #[serde(default)]
    pub area: Vec<String>,
    #[serde(default)]
    pub light: Vec<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub water: String,
    #[serde(default)]
    pub purpose: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecommendation {
    pub id: i64,
    pub name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub care_level: String,
    #[serde(default)]
    pub conditions: PlantConditions,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query-string filters for the recommendation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationFilters {
    /// Free-text search over name, scientific name, and tags.
    pub q: Option<String>,

    // Exact-match scalar filters
    pub care_level: Option<String>,
    pub size: Option<String>,
    pub water: Option<String>,

    // Membership filters against list-valued conditions
    pub light: Option<String>,
    pub area: Option<String>,
    pub purpose: Option<String>,

    // Pagination
    pub limit: Option<usize>,
}

/// In-memory recommendation list, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RecommendationCatalog {
    plants: Vec<PlantRecommendation>,
}

impl RecommendationCatalog {
    /// Load recommendations from a JSON array file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recommendation file: {:?}", path))?;

        let plants: Vec<PlantRecommendation> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse recommendation JSON: {:?}", path))?;

        Ok(Self { plants })
    }

    pub fn from_plants(plants: Vec<PlantRecommendation>) -> Self {
        Self { plants }
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Apply all set filters, in list order, capped at `limit` (default 20,
    /// max 100).
    pub fn search(&self, filters: &RecommendationFilters) -> Vec<&PlantRecommendation> {
        let limit = filters.limit.unwrap_or(20).min(100);
        let needle = filters.q.as_ref().map(|q| q.to_lowercase());

        self.plants
            .iter()
            .filter(|plant| {
                if let Some(needle) = &needle {
                    if !Self::matches_text(plant, needle) {
                        return false;
                    }
                }
                if let Some(level) = &filters.care_level {
                    if &plant.care_level != level {
                        return false;
                    }
                }
                if let Some(size) = &filters.size {
                    if &plant.conditions.size != size {
                        return false;
                    }
                }
                if let Some(water) = &filters.water {
                    if &plant.conditions.water != water {
                        return false;
                    }
                }
                if let Some(light) = &filters.light {
                    if !plant.conditions.light.contains(light) {
                        return false;
                    }
                }
                if let Some(area) = &filters.area {
                    if !plant.conditions.area.contains(area) {
                        return false;
                    }
                }
                if let Some(purpose) = &filters.purpose {
                    if !plant.conditions.purpose.contains(purpose) {
                        return false;
                    }
                }
                true
            })
            .take(limit)
            .collect()
    }

    fn matches_text(plant: &PlantRecommendation, needle: &str) -> bool {
        plant.name.to_lowercase().contains(needle)
            || plant.scientific_name.to_lowercase().contains(needle)
            || plant
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(id: i64, name: &str, care_level: &str, light: &[&str]) -> PlantRecommendation {
        PlantRecommendation {
            id,
            name: name.to_string(),
            scientific_name: format!("{} latinensis", name),
            image: String::new(),
            description: String::new(),
            care_level: care_level.to_string(),
            conditions: PlantConditions {
                light: light.iter().map(|s| s.to_string()).collect(),
                water: "weekly".to_string(),
                ..Default::default()
            },
            benefits: vec![],
            tags: vec!["indoor".to_string()],
        }
    }

    fn catalog() -> RecommendationCatalog {
        RecommendationCatalog::from_plants(vec![
            plant(1, "Monstera", "easy", &["partial"]),
            plant(2, "Fiddle Leaf Fig", "hard", &["full", "partial"]),
            plant(3, "Snake Plant", "easy", &["shade"]),
        ])
    }

    #[test]
    fn no_filters_returns_everything_up_to_limit() {
        let catalog = catalog();
        let results = catalog.search(&RecommendationFilters::default());
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn scalar_filters_are_exact() {
        let filters = RecommendationFilters {
            care_level: Some("easy".to_string()),
            ..Default::default()
        };
        let catalog = catalog();
        let results = catalog.search(&filters);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.care_level == "easy"));
    }

    #[test]
    fn list_filters_use_membership() {
        let filters = RecommendationFilters {
            light: Some("partial".to_string()),
            ..Default::default()
        };
        let catalog = catalog();
        let results = catalog.search(&filters);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn text_search_is_case_insensitive_over_names_and_tags() {
        let catalog = catalog();

        let by_name = catalog.search(&RecommendationFilters {
            q: Some("snake".to_string()),
            ..Default::default()
        });
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Snake Plant");

        let by_tag = catalog.search(&RecommendationFilters {
            q: Some("INDOOR".to_string()),
            ..Default::default()
        });
        assert_eq!(by_tag.len(), 3);
    }

    #[test]
    fn limit_is_applied_and_capped() {
        let catalog = catalog();
        let results = catalog.search(&RecommendationFilters {
            limit: Some(2),
            ..Default::default()
        });
        assert_eq!(results.len(), 2);

        let capped = catalog.search(&RecommendationFilters {
            limit: Some(10_000),
            ..Default::default()
        });
        assert_eq!(capped.len(), 3);
    }
}
