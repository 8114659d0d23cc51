//! Session persistence.
//!
//! Both stores write the same JSON envelope, `{ "schemaVersion": N, "state": {...} }`.
//! A stored envelope whose version differs from `SCHEMA_VERSION` is refused
//! rather than deserialized into the current shape.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use redis::aio::MultiplexedConnection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::models::SessionState;

pub const SCHEMA_VERSION: u32 = 1;
pub const SESSION_KEY_PREFIX: &str = "masar_app_state";

/// Idle sessions expire after 90 days in both stores.
pub const SESSION_TTL_SECS: u64 = 90 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored session has schema version {found}, expected {expected}")]
    IncompatibleSchema { found: u64, expected: u32 },
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<SessionState>, StoreError>;
    async fn save(&self, state: &SessionState) -> Result<(), StoreError>;
}

pub fn session_key(id: Uuid) -> String {
    format!("{SESSION_KEY_PREFIX}:{id}")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u32,
    state: &'a SessionState,
}

pub fn encode_envelope(state: &SessionState) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        state,
    })?)
}

pub fn decode_envelope(raw: &str) -> Result<SessionState, StoreError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Envelope {
        #[serde(default)]
        schema_version: u64,
        state: Value,
    }

    let envelope: Envelope = serde_json::from_str(raw)?;
    if envelope.schema_version != u64::from(SCHEMA_VERSION) {
        return Err(StoreError::IncompatibleSchema {
            found: envelope.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.state)?)
}

// ────────────────────────────────────────────────────────────────────────────
// InMemorySessionStore
// ────────────────────────────────────────────────────────────────────────────

struct StoredEnvelope {
    updated_at: DateTime<Utc>,
    raw: String,
}

impl StoredEnvelope {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.updated_at > session_ttl()
    }
}

fn session_ttl() -> Duration {
    Duration::seconds(SESSION_TTL_SECS as i64)
}

/// Process-local store. Keeps encoded envelopes so it exercises the same
/// serialization path as Redis.
///
/// Sessions idle longer than `SESSION_TTL_SECS` read as absent and are swept
/// out on the next save, matching the Redis key expiry.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<Uuid, StoredEnvelope>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionState>, StoreError> {
        let entries = self.entries.read().await;
        match entries.get(&id) {
            Some(entry) if !entry.is_expired(Utc::now()) => {
                decode_envelope(&entry.raw).map(Some)
            }
            _ => Ok(None),
        }
    }

    async fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        let raw = encode_envelope(state)?;
        let now = Utc::now();

        let mut entries = self.entries.write().await;
        entries.insert(
            state.id,
            StoredEnvelope {
                updated_at: state.updated_at,
                raw,
            },
        );
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        if entries.len() < before {
            debug!(swept = before - entries.len(), "expired in-memory sessions removed");
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RedisSessionStore
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis...");
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis session store ready");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionState>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(session_key(id))
            .query_async(&mut conn)
            .await?;
        raw.as_deref().map(decode_envelope).transpose()
    }

    async fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        let raw = encode_envelope(state)?;
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(session_key(state.id))
            .arg(&raw)
            .arg("EX")
            .arg(SESSION_TTL_SECS)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!(session_id = %state.id, bytes = raw.len(), "session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_key_format() {
        let id = Uuid::nil();
        assert_eq!(
            session_key(id),
            "masar_app_state:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_envelope_carries_version() {
        let state = SessionState::new(Utc::now());
        let raw = encode_envelope(&state).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schemaVersion"], json!(SCHEMA_VERSION));
        assert_eq!(decode_envelope(&raw).unwrap(), state);
    }

    #[test]
    fn test_rejects_other_schema_versions() {
        let state = SessionState::new(Utc::now());
        let raw = json!({ "schemaVersion": 7, "state": state }).to_string();
        assert!(matches!(
            decode_envelope(&raw),
            Err(StoreError::IncompatibleSchema { found: 7, expected: 1 })
        ));

        // Pre-envelope blobs have no version at all.
        let bare = serde_json::to_string(&json!({ "state": {} })).unwrap();
        assert!(matches!(
            decode_envelope(&bare),
            Err(StoreError::IncompatibleSchema { found: 0, .. })
        ));
    }

    #[test]
    fn test_malformed_envelope_is_serialization_error() {
        assert!(matches!(
            decode_envelope("not json"),
            Err(StoreError::Serialization(_))
        ));
        let raw = json!({ "schemaVersion": 1, "state": { "points": "many" } }).to_string();
        assert!(matches!(
            decode_envelope(&raw),
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_store_round_trip() {
        let store = InMemorySessionStore::new();
        let mut state = SessionState::new(Utc::now());
        assert!(store.load(state.id).await.unwrap().is_none());

        store.save(&state).await.unwrap();
        state.points = 40;
        store.save(&state).await.unwrap();

        let loaded = store.load(state.id).await.unwrap().unwrap();
        assert_eq!(loaded.points, 40);
    }

    #[tokio::test]
    async fn test_in_memory_store_expires_idle_sessions() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();

        let fresh = SessionState::new(now);
        store.save(&fresh).await.unwrap();

        let idle = SessionState::new(now - Duration::days(91));
        store.save(&idle).await.unwrap();

        assert!(store.load(idle.id).await.unwrap().is_none());
        assert!(store.load(fresh.id).await.unwrap().is_some());
        assert_eq!(store.entries.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_store_sweeps_on_save() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();

        // Written as fresh, then aged past the TTL in place.
        let old = SessionState::new(now);
        store.save(&old).await.unwrap();
        store
            .entries
            .write()
            .await
            .get_mut(&old.id)
            .unwrap()
            .updated_at = now - Duration::days(400);
        assert!(store.load(old.id).await.unwrap().is_none());

        store.save(&SessionState::new(now)).await.unwrap();
        let entries = store.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(!entries.contains_key(&old.id));
    }
}
