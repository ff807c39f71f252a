use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{AggregateStats, GameResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid persisted value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Flat key-value persistence contract.
///
/// The quiz keeps its aggregates as a handful of scalar keys, so the store
/// only needs string get/set. Implementations are expected to serialize
/// individual calls; at most one session writes at a time by construction.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a value by key, `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write or overwrite a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

//
// ─── STATS RECORD ──────────────────────────────────────────────────────────────
//

/// Keys under which aggregate stats are persisted.
mod keys {
    pub const GAMES_COUNT: &str = "games_count";
    pub const CORRECT_TOTAL: &str = "correct_total";
    pub const BEST_GAME_CORRECT: &str = "best_game_correct";
    pub const BEST_GAME_TOTAL: &str = "best_game_total";
    pub const BEST_GAME_DATE: &str = "best_game_date";
}

/// Persisted shape for aggregate stats, one scalar key per field.
///
/// Mirrors the domain `AggregateStats` so the store stays a plain key-value
/// map without leaking persistence concerns into the domain layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecord {
    pub games_count: u32,
    pub correct_total: u32,
    pub best_game_correct: u32,
    pub best_game_total: u32,
    pub best_game_date: Option<DateTime<Utc>>,
}

impl StatsRecord {
    #[must_use]
    pub fn from_stats(stats: &AggregateStats) -> Self {
        let best = stats.best_game();
        Self {
            games_count: stats.games_played(),
            correct_total: stats.cumulative_correct(),
            best_game_correct: best.map_or(0, GameResult::correct),
            best_game_total: best.map_or(0, GameResult::total),
            best_game_date: best.map(GameResult::date),
        }
    }

    /// Convert the record back into domain aggregates.
    ///
    /// A record with no best-game date (or an all-zero best game) maps to
    /// "no best game yet", matching the store's unwritten-key defaults.
    #[must_use]
    pub fn into_stats(self) -> AggregateStats {
        let best_game = self.best_game_date.and_then(|date| {
            (self.best_game_correct > 0 || self.best_game_total > 0)
                .then(|| GameResult::new(self.best_game_correct, self.best_game_total, date))
        });
        AggregateStats::from_parts(self.games_count, self.correct_total, best_game)
    }

    /// Read the record from a key-value store; missing keys default to zero.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidValue` if a stored scalar fails to
    /// parse, or any backend error from the store.
    pub async fn read_from(store: &dyn KeyValueStore) -> Result<Self, StorageError> {
        Ok(Self {
            games_count: read_u32(store, keys::GAMES_COUNT).await?,
            correct_total: read_u32(store, keys::CORRECT_TOTAL).await?,
            best_game_correct: read_u32(store, keys::BEST_GAME_CORRECT).await?,
            best_game_total: read_u32(store, keys::BEST_GAME_TOTAL).await?,
            best_game_date: read_date(store, keys::BEST_GAME_DATE).await?,
        })
    }

    /// Write all scalar keys back to the store.
    ///
    /// # Errors
    ///
    /// Returns any backend error from the store.
    pub async fn write_to(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store
            .set(keys::GAMES_COUNT, &self.games_count.to_string())
            .await?;
        store
            .set(keys::CORRECT_TOTAL, &self.correct_total.to_string())
            .await?;
        store
            .set(keys::BEST_GAME_CORRECT, &self.best_game_correct.to_string())
            .await?;
        store
            .set(keys::BEST_GAME_TOTAL, &self.best_game_total.to_string())
            .await?;
        if let Some(date) = self.best_game_date {
            store.set(keys::BEST_GAME_DATE, &date.to_rfc3339()).await?;
        }
        Ok(())
    }
}

async fn read_u32(store: &dyn KeyValueStore, key: &str) -> Result<u32, StorageError> {
    match store.get(key).await? {
        Some(raw) => raw.parse().map_err(|_| StorageError::InvalidValue {
            key: key.to_owned(),
            value: raw,
        }),
        None => Ok(0),
    }
}

async fn read_date(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<DateTime<Utc>>, StorageError> {
    match store.get(key).await? {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|date| Some(date.with_timezone(&Utc)))
            .map_err(|_| StorageError::InvalidValue {
                key: key.to_owned(),
                value: raw,
            }),
        None => Ok(None),
    }
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Simple in-memory store implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Aggregates the persistence seam behind a trait object for backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            kv: Arc::new(InMemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[tokio::test]
    async fn missing_keys_read_as_empty_stats() {
        let store = InMemoryStore::new();
        let record = StatsRecord::read_from(&store).await.unwrap();

        let stats = record.into_stats();
        assert_eq!(stats.games_played(), 0);
        assert_eq!(stats.cumulative_correct(), 0);
        assert!(stats.best_game().is_none());
    }

    #[tokio::test]
    async fn stats_round_trip_through_scalar_keys() {
        let store = InMemoryStore::new();
        let mut stats = AggregateStats::new();
        stats.record(7, 1, fixed_now());

        StatsRecord::from_stats(&stats)
            .write_to(&store)
            .await
            .unwrap();
        let reloaded = StatsRecord::read_from(&store).await.unwrap().into_stats();

        assert_eq!(reloaded, stats);
        assert_eq!(reloaded.best_game().unwrap().date(), fixed_now());
    }

    #[tokio::test]
    async fn garbage_scalar_surfaces_invalid_value() {
        let store = InMemoryStore::new();
        store.set("games_count", "not-a-number").await.unwrap();

        let err = StatsRecord::read_from(&store).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidValue { .. }));
    }
}
