//! Document store configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::InMemoryStoreOptions;

use super::error::ValidationError;

/// Tuning of the document store adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Undelivered snapshots queued per watcher
    #[serde(default = "default_watch_buffer")]
    pub watch_buffer: usize,

    /// Artificial write latency in milliseconds, for exercising slow paths
    #[serde(default)]
    pub latency_ms: u64,
}

impl StoreConfig {
    /// Get write latency as Duration
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn in_memory_options(&self) -> InMemoryStoreOptions {
        InMemoryStoreOptions {
            watch_buffer: self.watch_buffer,
            write_latency: self.latency(),
        }
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.watch_buffer == 0 || self.watch_buffer > 10_000 {
            return Err(ValidationError::InvalidWatchBuffer);
        }
        if self.latency_ms > 60_000 {
            return Err(ValidationError::LatencyTooLarge);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            watch_buffer: default_watch_buffer(),
            latency_ms: 0,
        }
    }
}

fn default_watch_buffer() -> usize {
    32
}
