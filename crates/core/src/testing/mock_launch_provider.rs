//! Mock launch provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::provider::{LaunchProvider, ProviderError, RawLaunch};

/// Mock implementation of the LaunchProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable launch list, in order
/// - Count fetches for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use launchpad_core::testing::{MockLaunchProvider, fixtures};
///
/// let provider = MockLaunchProvider::new();
/// provider.set_launches(vec![fixtures::falcon_sat()]).await;
///
/// let launches = provider.fetch_all_launches().await?;
/// assert_eq!(provider.fetch_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockLaunchProvider {
    /// Launches returned by the next fetch, in provider order.
    launches: Arc<RwLock<Vec<RawLaunch>>>,
    /// Number of fetches performed.
    fetches: Arc<RwLock<usize>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
}

impl Default for MockLaunchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLaunchProvider {
    /// Create a new mock provider with no launches.
    pub fn new() -> Self {
        Self {
            launches: Arc::new(RwLock::new(Vec::new())),
            fetches: Arc::new(RwLock::new(0)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a mock provider preloaded with launches.
    pub fn with_launches(launches: Vec<RawLaunch>) -> Self {
        Self {
            launches: Arc::new(RwLock::new(launches)),
            ..Self::new()
        }
    }

    /// Replace the launch list.
    pub async fn set_launches(&self, launches: Vec<RawLaunch>) {
        *self.launches.write().await = launches;
    }

    /// Append a launch to the end of the list.
    pub async fn push_launch(&self, launch: RawLaunch) {
        self.launches.write().await.push(launch);
    }

    /// Number of fetches performed so far (including failed ones).
    pub async fn fetch_count(&self) -> usize {
        *self.fetches.read().await
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }
}

#[async_trait]
impl LaunchProvider for MockLaunchProvider {
    async fn fetch_all_launches(&self) -> Result<Vec<RawLaunch>, ProviderError> {
        *self.fetches.write().await += 1;

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.launches.read().await.clone())
    }
}
