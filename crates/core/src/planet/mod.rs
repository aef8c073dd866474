//! Reference catalog of destination bodies.
//!
//! The scheduling engine only reads it, by exact name. Seeding happens at
//! startup from configuration.

mod sqlite_store;

pub use sqlite_store::SqlitePlanetStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A destination body launches can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub kepler_name: String,
}

/// Errors for planet store operations.
#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for planet storage backends.
pub trait PlanetStore: Send + Sync {
    /// Look a planet up by exact name. Never matches partially.
    fn find_by_name(&self, kepler_name: &str) -> Result<Option<Planet>, PlanetError>;

    /// Add a planet if it is not already known. Returns true if it was added.
    fn upsert(&self, kepler_name: &str) -> Result<bool, PlanetError>;

    /// All planets, ordered by name.
    fn list(&self) -> Result<Vec<Planet>, PlanetError>;
}
