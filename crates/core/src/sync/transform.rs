//! Provider document to catalog record conversion.

use chrono::Utc;

use crate::launch::LaunchRecord;
use crate::provider::RawLaunch;

impl From<RawLaunch> for LaunchRecord {
    /// Customers of every payload are flattened into one list, payload order
    /// first. A launch the provider has no outcome for yet counts as successful.
    fn from(raw: RawLaunch) -> Self {
        let customers = raw
            .payloads
            .into_iter()
            .flat_map(|payload| payload.customers)
            .collect();

        Self {
            flight_number: raw.flight_number,
            mission: raw.name,
            rocket: raw.rocket.name,
            launch_date: raw.date_local.with_timezone(&Utc),
            target: None,
            customers,
            upcoming: raw.upcoming,
            success: raw.success.unwrap_or(true),
        }
    }
}
