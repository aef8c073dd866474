//! Types for the launch catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A launch in the local catalog.
///
/// `flight_number` is the business key. Storage row ids and version markers
/// live only in the database and are never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRecord {
    /// Unique flight number.
    pub flight_number: i64,
    /// Mission display name.
    pub mission: String,
    /// Vehicle name.
    pub rocket: String,
    /// Scheduled or actual launch time.
    pub launch_date: DateTime<Utc>,
    /// Destination body name (only set for locally scheduled launches).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Customers, in payload order.
    #[serde(default)]
    pub customers: Vec<String>,
    /// True until the launch has happened or been aborted.
    pub upcoming: bool,
    /// Whether the launch succeeded (or, for local aborts, was not aborted).
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

/// A launch that has not been assigned a flight number yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLaunch {
    pub mission: String,
    pub rocket: String,
    pub launch_date: DateTime<Utc>,
    pub target: Option<String>,
    pub customers: Vec<String>,
    pub upcoming: bool,
    pub success: bool,
}

impl NewLaunch {
    /// Attach a flight number, producing the record that gets persisted.
    pub fn into_record(self, flight_number: i64) -> LaunchRecord {
        LaunchRecord {
            flight_number,
            mission: self.mission,
            rocket: self.rocket,
            launch_date: self.launch_date,
            target: self.target,
            customers: self.customers,
            upcoming: self.upcoming,
            success: self.success,
        }
    }
}

/// Equality filter over launch fields. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchFilter {
    pub flight_number: Option<i64>,
    pub mission: Option<String>,
    pub rocket: Option<String>,
    pub launch_date: Option<DateTime<Utc>>,
    pub target: Option<String>,
    pub customers: Option<Vec<String>>,
    pub upcoming: Option<bool>,
    pub success: Option<bool>,
}

impl LaunchFilter {
    /// Create an empty filter (matches every launch).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by flight number.
    pub fn with_flight_number(mut self, flight_number: i64) -> Self {
        self.flight_number = Some(flight_number);
        self
    }

    /// Filter by mission name.
    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = Some(mission.into());
        self
    }

    /// Filter by rocket name.
    pub fn with_rocket(mut self, rocket: impl Into<String>) -> Self {
        self.rocket = Some(rocket.into());
        self
    }

    /// Filter by launch date.
    pub fn with_launch_date(mut self, launch_date: DateTime<Utc>) -> Self {
        self.launch_date = Some(launch_date);
        self
    }

    /// Filter by destination name.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Filter by the exact customer list, order included.
    pub fn with_customers(mut self, customers: Vec<String>) -> Self {
        self.customers = Some(customers);
        self
    }

    /// Filter by the upcoming flag.
    pub fn with_upcoming(mut self, upcoming: bool) -> Self {
        self.upcoming = Some(upcoming);
        self
    }

    /// Filter by the success flag.
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }
}

/// Partial update applied to a single launch. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchUpdate {
    pub mission: Option<String>,
    pub rocket: Option<String>,
    pub launch_date: Option<DateTime<Utc>>,
    pub target: Option<String>,
    pub customers: Option<Vec<String>>,
    pub upcoming: Option<bool>,
    pub success: Option<bool>,
}

impl LaunchUpdate {
    /// The update that marks a launch as aborted.
    pub fn aborted() -> Self {
        Self {
            upcoming: Some(false),
            success: Some(false),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Errors for launch store operations.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
