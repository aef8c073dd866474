//! Launch catalog - the authoritative collection of launches.
//!
//! Launches are keyed by flight number. They arrive in bulk from the external
//! provider during bootstrap and one at a time from the scheduling engine.

mod sqlite_store;
mod store;
mod types;

pub use sqlite_store::SqliteLaunchStore;
pub use store::LaunchStore;
pub use types::*;
