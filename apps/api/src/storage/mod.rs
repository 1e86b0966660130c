#![allow(dead_code)]

//! Publish persistence — the durable per-session key-value slot the
//! read-only view consumes.
//!
//! The full document is serialized on an explicit publish action; absence
//! of the key and an unparseable payload are distinct, user-visible read
//! failures, never a crash.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::portfolio::PortfolioDocument;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no published portfolio for session '{0}'")]
    Missing(String),

    #[error("stored portfolio is corrupted: {0}")]
    Corrupt(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// What the publish action writes: the field-complete document plus the
/// moment it was published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPortfolio {
    pub document: PortfolioDocument,
    pub published_at: DateTime<Utc>,
}

/// Fixed key for a session's publish slot.
pub fn publish_key(session: &str) -> String {
    format!("portfolio:published:{session}")
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, session: &str, snapshot: &PublishedPortfolio)
        -> Result<(), SnapshotError>;
    async fn load(&self, session: &str) -> Result<PublishedPortfolio, SnapshotError>;
}

/// Redis-backed publish slot.
pub struct RedisSnapshotStore {
    client: redis::Client,
}

impl RedisSnapshotStore {
    pub fn new(client: redis::Client) -> Self {
        RedisSnapshotStore { client }
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn save(
        &self,
        session: &str,
        snapshot: &PublishedPortfolio,
    ) -> Result<(), SnapshotError> {
        let payload = serde_json::to_string(snapshot)
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        let mut con = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        con.set::<_, _, ()>(publish_key(session), payload)
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn load(&self, session: &str) -> Result<PublishedPortfolio, SnapshotError> {
        let mut con = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        let payload: Option<String> = con
            .get(publish_key(session))
            .await
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        let payload = payload.ok_or_else(|| SnapshotError::Missing(session.to_string()))?;
        serde_json::from_str(&payload).map_err(|e| SnapshotError::Corrupt(e.to_string()))
    }
}

/// In-memory publish slot for tests.
#[derive(Default)]
pub struct MemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an arbitrary payload into a session's slot, letting tests
    /// simulate corruption.
    pub fn insert_raw(&self, session: &str, payload: &str) {
        self.entries
            .write()
            .expect("snapshot map lock poisoned")
            .insert(publish_key(session), payload.to_string());
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn save(
        &self,
        session: &str,
        snapshot: &PublishedPortfolio,
    ) -> Result<(), SnapshotError> {
        let payload = serde_json::to_string(snapshot)
            .map_err(|e| SnapshotError::Backend(e.to_string()))?;
        self.entries
            .write()
            .expect("snapshot map lock poisoned")
            .insert(publish_key(session), payload);
        Ok(())
    }

    async fn load(&self, session: &str) -> Result<PublishedPortfolio, SnapshotError> {
        let payload = self
            .entries
            .read()
            .expect("snapshot map lock poisoned")
            .get(&publish_key(session))
            .cloned()
            .ok_or_else(|| SnapshotError::Missing(session.to_string()))?;
        serde_json::from_str(&payload).map_err(|e| SnapshotError::Corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::PortfolioDocument;
    use crate::store::ids::SequentialIds;

    #[tokio::test]
    async fn test_publish_round_trip() {
        let storage = MemorySnapshotStore::new();
        let ids = SequentialIds::new();
        let snapshot = PublishedPortfolio {
            document: PortfolioDocument::seed(&ids),
            published_at: Utc::now(),
        };

        storage.save("alpha", &snapshot).await.unwrap();
        let loaded = storage.load("alpha").await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_missing_key_is_a_distinct_condition() {
        let storage = MemorySnapshotStore::new();
        let err = storage.load("ghost").await.unwrap_err();
        assert!(matches!(err, SnapshotError::Missing(_)));
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_a_distinct_condition() {
        let storage = MemorySnapshotStore::new();
        storage.insert_raw("alpha", "{not json");
        let err = storage.load("alpha").await.unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt(_)));
    }

    #[test]
    fn test_publish_key_is_fixed_per_session() {
        assert_eq!(publish_key("alpha"), "portfolio:published:alpha");
    }
}
