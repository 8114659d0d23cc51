//! Axum route handlers for the Market API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::market::simulator::MarketReport;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    #[serde(flatten)]
    pub report: MarketReport,
    pub cached: bool,
}

/// GET /api/v1/market/trends?refresh=true
///
/// Simulated market snapshot. Reused for an hour unless `refresh` is set.
pub async fn handle_market_trends(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TrendsQuery>,
) -> Result<Json<TrendsResponse>, AppError> {
    let (report, cached) = state.market.get_or_refresh(query.refresh).await;
    Ok(Json(TrendsResponse { report, cached }))
}
