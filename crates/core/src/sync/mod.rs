//! Catalog bootstrap from the external launch provider.
//!
//! Bootstrap runs once at startup. Whether it is needed is decided by looking
//! for a sentinel launch (the very first flight) rather than by diffing the
//! whole catalog. Population overwrites by flight number, so replaying it
//! converges to the same state.

mod transform;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::launch::{LaunchError, LaunchFilter, LaunchRecord, LaunchStore};
use crate::metrics::{LAUNCHES_SYNCED, SYNC_RUNS};
use crate::provider::{LaunchProvider, ProviderError};

/// Errors that abort a synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Launch provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Launch store failed: {0}")]
    Store(#[from] LaunchError),
}

/// The launch whose presence means the catalog has been bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSentinel {
    pub flight_number: i64,
    pub rocket: String,
    pub mission: String,
}

impl Default for BootstrapSentinel {
    fn default() -> Self {
        Self {
            flight_number: 1,
            rocket: "Falcon 1".to_string(),
            mission: "FalconSat".to_string(),
        }
    }
}

impl BootstrapSentinel {
    fn filter(&self) -> LaunchFilter {
        LaunchFilter::new()
            .with_flight_number(self.flight_number)
            .with_rocket(self.rocket.as_str())
            .with_mission(self.mission.as_str())
    }
}

/// Result of [`CatalogSynchronizer::ensure_bootstrapped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The sentinel was present; nothing was fetched.
    AlreadyLoaded,
    /// The catalog was populated from the provider.
    Populated { launches: usize },
}

/// Populates the launch store from the external provider.
pub struct CatalogSynchronizer {
    store: Arc<dyn LaunchStore>,
    provider: Arc<dyn LaunchProvider>,
    sentinel: BootstrapSentinel,
}

impl CatalogSynchronizer {
    pub fn new(store: Arc<dyn LaunchStore>, provider: Arc<dyn LaunchProvider>) -> Self {
        Self {
            store,
            provider,
            sentinel: BootstrapSentinel::default(),
        }
    }

    /// Use a different sentinel launch.
    pub fn with_sentinel(mut self, sentinel: BootstrapSentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Whether the sentinel launch is already in the store.
    pub fn is_bootstrapped(&self) -> Result<bool, SyncError> {
        Ok(self.store.find_one(&self.sentinel.filter())?.is_some())
    }

    /// Populate the store unless it has been bootstrapped before.
    pub async fn ensure_bootstrapped(&self) -> Result<BootstrapOutcome, SyncError> {
        if self.is_bootstrapped()? {
            info!("Launch data already loaded");
            SYNC_RUNS.with_label_values(&["already_loaded"]).inc();
            return Ok(BootstrapOutcome::AlreadyLoaded);
        }

        match self.populate_from_provider().await {
            Ok(launches) => {
                SYNC_RUNS.with_label_values(&["populated"]).inc();
                Ok(BootstrapOutcome::Populated { launches })
            }
            Err(e) => {
                SYNC_RUNS.with_label_values(&["failed"]).inc();
                Err(e)
            }
        }
    }

    /// Fetch the full provider catalog and upsert every launch, in provider order.
    ///
    /// Returns the number of launches written. A provider failure writes
    /// nothing; a store failure stops the run and keeps what was already written.
    pub async fn populate_from_provider(&self) -> Result<usize, SyncError> {
        info!("Loading launch data from provider");

        let raw_launches = self.provider.fetch_all_launches().await.map_err(|e| {
            error!("Problem downloading launch data: {}", e);
            e
        })?;

        let mut written = 0;
        for raw in raw_launches {
            let launch = LaunchRecord::from(raw);
            debug!(flight_number = launch.flight_number, mission = %launch.mission, "Saving launch");
            self.store.upsert_by_flight_number(&launch)?;
            LAUNCHES_SYNCED.inc();
            written += 1;
        }

        info!("Synchronized {} launches", written);
        Ok(written)
    }
}
