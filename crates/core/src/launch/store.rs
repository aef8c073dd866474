//! Launch storage trait.

use super::{LaunchError, LaunchFilter, LaunchRecord, LaunchUpdate, NewLaunch};

/// Trait for launch storage backends.
///
/// Every method is atomic on its own; callers get no isolation across calls.
pub trait LaunchStore: Send + Sync {
    /// First launch (lowest flight number) matching the filter.
    fn find_one(&self, filter: &LaunchFilter) -> Result<Option<LaunchRecord>, LaunchError>;

    /// The launch with the highest flight number, if any.
    fn find_latest_by_flight_number(&self) -> Result<Option<LaunchRecord>, LaunchError>;

    /// Launches ordered by ascending flight number.
    ///
    /// Drops `skip` launches from the front; a `limit` of 0 means unbounded.
    fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<LaunchRecord>, LaunchError>;

    /// Insert the launch, or overwrite every field of the launch sharing its
    /// flight number.
    fn upsert_by_flight_number(&self, launch: &LaunchRecord) -> Result<(), LaunchError>;

    /// Apply a partial update to the launch with this flight number.
    ///
    /// Never inserts. Returns the number of launches modified (0 or 1).
    fn update_fields_by_flight_number(
        &self,
        flight_number: i64,
        update: &LaunchUpdate,
    ) -> Result<usize, LaunchError>;

    /// Insert a launch under the next free flight number.
    ///
    /// The number is one past the current maximum, with `default_latest`
    /// standing in for the maximum when the store is empty. Allocation and
    /// insert run in one transaction; running out of numbers is an error and
    /// writes nothing.
    fn insert_with_next_flight_number(
        &self,
        launch: &NewLaunch,
        default_latest: i64,
    ) -> Result<LaunchRecord, LaunchError>;

    /// Total number of launches.
    fn count(&self) -> Result<u64, LaunchError>;
}
