use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus the recommender backend and session store in use.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store = if state.config.redis_url.is_some() {
        "redis"
    } else {
        "memory"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "masar-api",
        "recommender": state.recommender.backend(),
        "sessionStore": store
    }))
}
