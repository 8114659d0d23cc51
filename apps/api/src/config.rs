use anyhow::{Context, Result};

use crate::recommendation::engine::DEFAULT_MARKET_DEMAND;

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Unset means sessions live in process memory.
    pub redis_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub enable_llm_recommender: bool,
    pub market_demand: u32,
    /// Unset means any origin is allowed.
    pub frontend_url: Option<String>,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            redis_url: optional_env("REDIS_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            enable_llm_recommender: parse_env("ENABLE_LLM_RECOMMENDER", false)?,
            market_demand: parse_env("MARKET_DEMAND", DEFAULT_MARKET_DEMAND)?,
            frontend_url: optional_env("FRONTEND_URL"),
            max_body_bytes: parse_env("MAX_BODY_BYTES", 10 * 1024)?,
        })
    }
}

/// A set-but-blank variable counts as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
