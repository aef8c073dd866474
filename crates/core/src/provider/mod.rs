//! External launch provider.
//!
//! The provider is the read-only source the local catalog is bootstrapped
//! from. One query returns the whole catalog.

mod spacex;
mod types;

pub use spacex::SpaceXClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the launch provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Provider answered with anything but 200.
    #[error("Launch data download failed: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for launch providers.
#[async_trait]
pub trait LaunchProvider: Send + Sync {
    /// Fetch every launch the provider knows about, unpaginated, in provider order.
    ///
    /// Makes a single attempt; any non-success response is an error.
    async fn fetch_all_launches(&self) -> Result<Vec<RawLaunch>, ProviderError>;
}
