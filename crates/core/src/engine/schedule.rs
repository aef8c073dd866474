//! Scheduling new launches against a known destination.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SchedulingConfig;
use crate::launch::{LaunchError, LaunchRecord, LaunchStore, NewLaunch};
use crate::metrics::{LAUNCHES_SCHEDULED, SCHEDULE_REJECTIONS};
use crate::planet::{PlanetError, PlanetStore};

/// A caller's request to schedule a launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLaunchRequest {
    pub mission: String,
    pub rocket: String,
    pub launch_date: DateTime<Utc>,
    /// Destination name; must exist in the planet catalog.
    pub target: String,
    #[serde(default)]
    pub customers: Vec<String>,
}

/// Errors from [`LaunchScheduler::schedule`].
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("No matching planet was found: {0}")]
    TargetNotFound(String),

    #[error(transparent)]
    Store(#[from] LaunchError),

    #[error(transparent)]
    Reference(#[from] PlanetError),
}

/// Creates launches with the next free flight number.
pub struct LaunchScheduler {
    launches: Arc<dyn LaunchStore>,
    planets: Arc<dyn PlanetStore>,
    config: SchedulingConfig,
}

impl LaunchScheduler {
    pub fn new(
        launches: Arc<dyn LaunchStore>,
        planets: Arc<dyn PlanetStore>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            launches,
            planets,
            config,
        }
    }

    /// Schedule a launch.
    ///
    /// The target must name a known planet exactly; otherwise nothing is
    /// written. The new launch is upcoming, counted as successful, and carries
    /// the caller's customers followed by the configured defaults.
    pub fn schedule(&self, request: ScheduleLaunchRequest) -> Result<LaunchRecord, ScheduleError> {
        if self.planets.find_by_name(&request.target)?.is_none() {
            warn!(target_name = %request.target, "Rejected launch for unknown target");
            SCHEDULE_REJECTIONS.inc();
            return Err(ScheduleError::TargetNotFound(request.target));
        }

        let customers = merge_customers(request.customers, &self.config.default_customers);
        let new_launch = NewLaunch {
            mission: request.mission,
            rocket: request.rocket,
            launch_date: request.launch_date,
            target: Some(request.target),
            customers,
            upcoming: true,
            success: true,
        };

        let launch = self
            .launches
            .insert_with_next_flight_number(&new_launch, self.config.default_flight_number)?;

        LAUNCHES_SCHEDULED.inc();
        info!(
            flight_number = launch.flight_number,
            mission = %launch.mission,
            "Scheduled launch"
        );

        Ok(launch)
    }
}

/// Caller customers in order, then each default not already present.
fn merge_customers(mut customers: Vec<String>, defaults: &[String]) -> Vec<String> {
    for default in defaults {
        if !customers.contains(default) {
            customers.push(default.clone());
        }
    }
    customers
}
