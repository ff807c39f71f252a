use std::sync::Arc;

use crate::error::StatsError;
use quiz_core::Clock;
use quiz_core::model::AggregateStats;
use storage::repository::{KeyValueStore, StatsRecord};

/// Read-modify-write of persisted aggregate stats.
///
/// Called exactly once per completed session; the store serializes
/// individual calls, and at most one session is active at a time.
#[derive(Clone)]
pub struct StatisticsService {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
}

impl StatisticsService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, store }
    }

    /// Load the current aggregates; unwritten keys read as zeroes.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` if the store cannot be read.
    pub async fn load(&self) -> Result<AggregateStats, StatsError> {
        Ok(StatsRecord::read_from(self.store.as_ref())
            .await?
            .into_stats())
    }

    /// Fold one completed game into the persisted aggregates and return the
    /// updated values for summary display.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Storage` on read or write failure.
    pub async fn record(&self, correct: u32, total: u32) -> Result<AggregateStats, StatsError> {
        let mut stats = self.load().await?;
        stats.record(correct, total, self.clock.now());
        StatsRecord::from_stats(&stats)
            .write_to(self.store.as_ref())
            .await?;
        tracing::debug!(
            games_played = stats.games_played(),
            cumulative_correct = stats.cumulative_correct(),
            "game recorded"
        );
        Ok(stats)
    }
}
