pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::careers::handlers as careers;
use crate::gamification::handlers as gamification;
use crate::market::handlers as market;
use crate::recommendation::handlers as recommendation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Career tables
        .route("/api/v1/careers", get(careers::handle_list_careers))
        .route("/api/v1/careers/:id", get(careers::handle_get_career))
        .route("/api/v1/questionnaire", get(careers::handle_questionnaire))
        // Scoring
        .route(
            "/api/v1/recommendations",
            post(recommendation::handle_recommend),
        )
        // Progression
        .route("/api/v1/badges", get(gamification::handle_list_badges))
        .route(
            "/api/v1/actions/:kind/points",
            get(gamification::handle_action_points),
        )
        .route("/api/v1/progression", post(gamification::handle_progression))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:id", get(session::handle_get_session))
        .route(
            "/api/v1/sessions/:id/events",
            post(session::handle_session_event),
        )
        .route(
            "/api/v1/sessions/:id/recommendations",
            post(session::handle_session_recommendation),
        )
        // Market
        .route("/api/v1/market/trends", get(market::handle_market_trends))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
