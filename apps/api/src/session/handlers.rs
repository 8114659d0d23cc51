//! Axum route handlers for the Session API.

use std::collections::BTreeSet;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::gamification::badges::{check_badge_eligibility, BadgeId};
use crate::gamification::points::LevelSummary;
use crate::profile::validation::{profile_completeness, ProfileCompleteness};
use crate::recommendation::recommender::{RecommendationOutcome, RecommendationRequest};
use crate::session::controller::{SessionEvent, Transition};
use crate::session::models::SessionState;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session: SessionState,
    pub summary: LevelSummary,
    pub eligible_badges: BTreeSet<BadgeId>,
    pub profile_completeness: ProfileCompleteness,
}

impl SessionView {
    fn of(session: SessionState) -> Self {
        Self {
            summary: LevelSummary::for_points(session.points),
            eligible_badges: check_badge_eligibility(&session.progression_snapshot()),
            profile_completeness: profile_completeness(&session.profile),
            session,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub session: SessionState,
    pub transition: Transition,
}

#[derive(Debug, Serialize)]
pub struct SessionRecommendationResponse {
    #[serde(flatten)]
    pub outcome: RecommendationOutcome,
    pub transition: Transition,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(SessionView::of(session))))
}

/// GET /api/v1/sessions/:id
///
/// Full session state plus derived views: level summary, badges the user is
/// currently eligible for and which profile fields still need attention.
pub async fn handle_get_session(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionView::of(session)))
}

/// POST /api/v1/sessions/:id/events
pub async fn handle_session_event(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(event): AppJson<SessionEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let (session, transition) = state.sessions.dispatch(id, event).await?;
    Ok(Json(EventResponse {
        session,
        transition,
    }))
}

/// POST /api/v1/sessions/:id/recommendations
///
/// Scores the session's answers with the configured recommender and saves the
/// report on the session so it can be shared later.
pub async fn handle_session_recommendation(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<SessionRecommendationResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    let request = RecommendationRequest {
        answers: session.answers,
        profile: Some(session.profile),
    };

    // The recommender may call out to the model; no session lock is held here.
    let outcome = state.recommender.recommend(&request).await?;

    let (_, transition) = state
        .sessions
        .dispatch(
            id,
            SessionEvent::SaveReport {
                report: outcome.report.clone(),
            },
        )
        .await?;

    Ok(Json(SessionRecommendationResponse {
        outcome,
        transition,
    }))
}
