// Axum API Server Module
//
// Purpose: REST surface in front of the diagnosis matcher and the
// recommendation lookup. The matcher itself owns no transport concerns;
// this layer constructs queries from request payloads, maps "no confident
// match" to 404, and serializes the verdict fields.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use moka::future::Cache;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::Catalog;
use crate::recommend::{RecommendationCatalog, RecommendationFilters};
use crate::scorer::{DiagnosisMatcher, DiagnosisQuery, MatchResult};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<DiagnosisMatcher>,
    pub recommendations: Arc<RecommendationCatalog>,
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    /// Load both data files from `data_dir` and build the shared state.
    pub fn new(data_dir: &str) -> anyhow::Result<Self> {
        tracing::info!("Loading problem catalog...");
        let catalog = Catalog::load(&Path::new(data_dir).join("plant_problem_data.json"))?;
        tracing::info!("Loaded {} problem records", catalog.len());

        tracing::info!("Loading plant recommendations...");
        let recommendations =
            RecommendationCatalog::load(&Path::new(data_dir).join("plant_recommendations.json"))?;
        tracing::info!("Loaded {} recommendations", recommendations.len());

        Ok(Self::from_parts(catalog, recommendations))
    }

    /// Build state from already-loaded catalogs (tests supply synthetic
    /// data this way, without touching the filesystem).
    pub fn from_parts(catalog: Catalog, recommendations: RecommendationCatalog) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self {
            matcher: Arc::new(DiagnosisMatcher::new(catalog)),
            recommendations: Arc::new(recommendations),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Diagnosis endpoint (JSON API)
        .route("/api/diagnosis", post(diagnose))
        // Recommendation lookup (JSON API)
        .route("/api/recommendations", get(get_recommendations))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Run the matcher against the request's condition description.
///
/// "No confident match" is a valid negative result from the matcher; on the
/// wire it becomes 404, distinct from transport or data errors.
async fn diagnose(
    State(state): State<AppState>,
    Json(query): Json<DiagnosisQuery>,
) -> Result<Json<MatchResult>, AppError> {
    // CPU-bound work: run in blocking thread pool
    let matcher = state.matcher.clone();

    tracing::debug!(
        "Scoring diagnosis query against {} records",
        matcher.catalog().len()
    );

    let result = tokio::task::spawn_blocking(move || matcher.best_match_parallel(&query))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    match result {
        Some(result) => Ok(Json(result)),
        None => Err(AppError::NotFound(
            "No matching diagnosis found".to_string(),
        )),
    }
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(filters): Query<RecommendationFilters>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = format!("recommend:{:?}", filters);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for recommendation query");
        return Ok(Json(cached));
    }

    let results = state.recommendations.search(&filters);
    let result = serde_json::json!({
        "rows": results.len(),
        "data": results,
    });

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

// ============================================================================
// Error Handling
// ============================================================================

enum AppError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
