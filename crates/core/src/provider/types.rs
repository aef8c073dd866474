//! Launch documents as returned by the SpaceX launches query.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A launch document with `rocket` and `payloads` populated.
///
/// This is the provider's shape, not ours; the synchronizer converts it into a
/// `LaunchRecord`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawLaunch {
    pub flight_number: i64,
    /// Mission name.
    pub name: String,
    /// Launch time in the launch site's local offset.
    pub date_local: DateTime<FixedOffset>,
    pub upcoming: bool,
    /// Null until the launch has happened.
    #[serde(default)]
    pub success: Option<bool>,
    pub rocket: RawRocket,
    #[serde(default)]
    pub payloads: Vec<RawPayload>,
}

/// Populated rocket, reduced to its name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRocket {
    pub name: String,
}

/// Populated payload, reduced to its customers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawPayload {
    #[serde(default)]
    pub customers: Vec<String>,
}
