//! Aborting launches.

use std::sync::Arc;

use tracing::{debug, info};

use crate::launch::{LaunchError, LaunchFilter, LaunchStore, LaunchUpdate};
use crate::metrics::LAUNCHES_ABORTED;

/// Marks launches as aborted.
pub struct LaunchAborter {
    launches: Arc<dyn LaunchStore>,
}

impl LaunchAborter {
    pub fn new(launches: Arc<dyn LaunchStore>) -> Self {
        Self { launches }
    }

    /// Whether a launch with this flight number exists.
    pub fn exists(&self, flight_number: i64) -> Result<bool, LaunchError> {
        let filter = LaunchFilter::new().with_flight_number(flight_number);
        Ok(self.launches.find_one(&filter)?.is_some())
    }

    /// Set `upcoming` and `success` to false on the launch.
    ///
    /// Returns true when exactly one launch was modified. Aborting an already
    /// aborted launch still returns true; an unknown flight number returns
    /// false and creates nothing.
    pub fn abort(&self, flight_number: i64) -> Result<bool, LaunchError> {
        let modified = self
            .launches
            .update_fields_by_flight_number(flight_number, &LaunchUpdate::aborted())?;

        let aborted = modified == 1;
        if aborted {
            info!(flight_number, "Aborted launch");
            LAUNCHES_ABORTED.with_label_values(&["aborted"]).inc();
        } else {
            debug!(flight_number, "No launch to abort");
            LAUNCHES_ABORTED.with_label_values(&["not_found"]).inc();
        }
        Ok(aborted)
    }
}
