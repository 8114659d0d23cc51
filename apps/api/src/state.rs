use std::sync::Arc;

use crate::config::Config;
use crate::market::cache::MarketCache;
use crate::recommendation::recommender::Recommender;
use crate::session::controller::SessionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable recommender. Default: RuleBasedRecommender. Swap via ENABLE_LLM_RECOMMENDER.
    pub recommender: Arc<dyn Recommender>,
    pub sessions: Arc<SessionController>,
    pub market: Arc<MarketCache>,
}
