//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::recommendation::recommender::{RecommendationOutcome, RecommendationRequest};
use crate::state::AppState;

/// POST /api/v1/recommendations
///
/// Stateless scoring: `{ answers, profile? }` in, report out. Answers that match
/// no scoring rule, including unknown questions or options, contribute nothing;
/// an empty answer set scores every path at the base compatibility.
pub async fn handle_recommend(
    State(state): State<AppState>,
    AppJson(request): AppJson<RecommendationRequest>,
) -> Result<Json<RecommendationOutcome>, AppError> {
    let outcome = state.recommender.recommend(&request).await?;
    debug!(
        backend = ?outcome.backend,
        primary = %outcome.report.primary.id,
        "recommendation served"
    );
    Ok(Json(outcome))
}
