//! Per-process state handed to every handler.

use crate::config::ServerConfig;
use crate::telemetry::TelemetryConfig;
use std::sync::Arc;
use std::time::Instant;
use trailmap_api::{seed_demo, ApiError, FileStorage, MemoryStorage, Storage, TrailStore};

/// Everything the handlers share, passed around as `Arc<AppState>`
/// through axum's State extractor.
pub struct AppState {
    /// The trail store.
    pub store: TrailStore,

    /// Server configuration.
    pub config: ServerConfig,

    /// Effective logging configuration, kept for the startup log line.
    pub telemetry_config: TelemetryConfig,

    /// Process start, for `/api/stats` uptime.
    pub start_time: Instant,
}

impl AppState {
    /// Open the store and capture the start time.
    ///
    /// A configured data directory selects the file-backed store,
    /// otherwise the store is in-memory. Loads the demo dataset when the
    /// seed flag is set and the store is empty.
    pub async fn new(
        config: ServerConfig,
        telemetry_config: TelemetryConfig,
    ) -> Result<Self, ApiError> {
        let storage: Arc<dyn Storage> = match &config.data_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => Arc::new(MemoryStorage::new()),
        };
        let store = TrailStore::open(storage).await?;

        if config.seed_demo {
            let summary = seed_demo(&store).await?;
            if !summary.seeded {
                tracing::debug!("store not empty, demo seed skipped");
            }
        }

        Ok(Self {
            store,
            config,
            telemetry_config,
            start_time: Instant::now(),
        })
    }

    /// Seconds since the server started.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
