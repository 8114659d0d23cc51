//! Axum route handlers for badges, action points and level summaries.

use std::collections::BTreeSet;

use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::gamification::badges::{
    check_badge_eligibility, Badge, BadgeId, ProgressionSnapshot, BADGES,
};
use crate::gamification::points::{action_points, LevelSummary};

#[derive(Debug, Serialize)]
pub struct ActionPointsResponse {
    pub kind: String,
    pub points: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionResponse {
    #[serde(flatten)]
    pub summary: LevelSummary,
    pub eligible_badges: BTreeSet<BadgeId>,
}

/// GET /api/v1/badges
pub async fn handle_list_badges() -> Json<&'static [Badge]> {
    Json(BADGES)
}

/// GET /api/v1/actions/:kind/points
///
/// Unknown action kinds are not an error; they are worth 0 points.
pub async fn handle_action_points(
    AppPath(kind): AppPath<String>,
) -> Result<Json<ActionPointsResponse>, AppError> {
    let points = action_points(&kind);
    Ok(Json(ActionPointsResponse { kind, points }))
}

/// POST /api/v1/progression
pub async fn handle_progression(
    AppJson(snapshot): AppJson<ProgressionSnapshot>,
) -> Result<Json<ProgressionResponse>, AppError> {
    Ok(Json(ProgressionResponse {
        summary: LevelSummary::for_points(snapshot.points),
        eligible_badges: check_badge_eligibility(&snapshot),
    }))
}
