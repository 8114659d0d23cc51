use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::market::simulator::{generate_market_report, MarketReport};

/// A generated report is served again until it is this old.
pub const MARKET_CACHE_TTL_MINUTES: i64 = 60;

/// Holds the last simulated report so repeated page views see stable numbers.
#[derive(Default)]
pub struct MarketCache {
    latest: RwLock<Option<MarketReport>>,
}

impl MarketCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached report if it is still fresh, otherwise generates a new
    /// one. The flag is `true` when the report came from the cache.
    pub async fn get_or_refresh(&self, force: bool) -> (MarketReport, bool) {
        if !force {
            if let Some(report) = self.latest.read().await.as_ref() {
                if is_fresh(report) {
                    return (report.clone(), true);
                }
            }
        }

        let report = generate_market_report(&mut rand::thread_rng());
        *self.latest.write().await = Some(report.clone());
        (report, false)
    }
}

fn is_fresh(report: &MarketReport) -> bool {
    let age_ms = Utc::now().timestamp_millis() - report.timestamp;
    age_ms < Duration::minutes(MARKET_CACHE_TTL_MINUTES).num_milliseconds()
}
