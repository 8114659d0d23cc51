mod careers;
mod config;
mod errors;
mod extract;
mod gamification;
mod llm_client;
mod market;
mod profile;
mod recommendation;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::market::cache::MarketCache;
use crate::recommendation::engine::ScoringConfig;
use crate::recommendation::recommender::{LlmRecommender, Recommender, RuleBasedRecommender};
use crate::routes::build_router;
use crate::session::controller::SessionController;
use crate::session::store::{InMemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("masar_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Masar API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisSessionStore::connect(url).await?),
        None => {
            warn!("REDIS_URL not set, sessions are kept in memory and lost on restart");
            Arc::new(InMemorySessionStore::new())
        }
    };

    let scoring = ScoringConfig {
        market_demand: config.market_demand,
    };
    let recommender = build_recommender(&config, scoring)?;
    info!("Recommender backend: {:?}", recommender.backend());

    let state = AppState {
        config: config.clone(),
        recommender,
        sessions: Arc::new(SessionController::new(store)),
        market: Arc::new(MarketCache::new()),
    };

    // build_router applies the MAX_BODY_BYTES limit itself.
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config)?),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// RuleBasedRecommender unless ENABLE_LLM_RECOMMENDER is set and a key is present.
fn build_recommender(config: &Config, scoring: ScoringConfig) -> Result<Arc<dyn Recommender>> {
    match (&config.anthropic_api_key, config.enable_llm_recommender) {
        (Some(key), true) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmRecommender::new(llm, scoring)))
        }
        (None, true) => {
            warn!(
                "ENABLE_LLM_RECOMMENDER is set but ANTHROPIC_API_KEY is missing, using rule engine"
            );
            Ok(Arc::new(RuleBasedRecommender::new(scoring)))
        }
        _ => Ok(Arc::new(RuleBasedRecommender::new(scoring))),
    }
}

fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let layer = match &config.frontend_url {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };
    Ok(layer)
}
