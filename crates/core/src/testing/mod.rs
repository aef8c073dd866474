//! Testing utilities and mock implementations.
//!
//! This module provides a mock launch provider and fixtures so the
//! synchronizer, engines and HTTP layer can be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use launchpad_core::testing::{fixtures, MockLaunchProvider};
//!
//! let provider = MockLaunchProvider::with_launches(fixtures::early_falcon_launches());
//!
//! // Hand it to a CatalogSynchronizer...
//! ```

mod mock_launch_provider;

pub use mock_launch_provider::MockLaunchProvider;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    use crate::engine::ScheduleLaunchRequest;
    use crate::launch::LaunchRecord;
    use crate::provider::{RawLaunch, RawPayload, RawRocket};

    /// Create a raw provider launch with one payload per customer group.
    pub fn raw_launch(
        flight_number: i64,
        name: &str,
        rocket: &str,
        payload_customers: &[&[&str]],
    ) -> RawLaunch {
        RawLaunch {
            flight_number,
            name: name.to_string(),
            date_local: launch_site_time(2006 + flight_number as i32 % 10),
            upcoming: false,
            success: Some(true),
            rocket: RawRocket {
                name: rocket.to_string(),
            },
            payloads: payload_customers
                .iter()
                .map(|customers| RawPayload {
                    customers: customers.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// The canonical first launch that marks the catalog as bootstrapped.
    pub fn falcon_sat() -> RawLaunch {
        RawLaunch {
            success: Some(false),
            ..raw_launch(1, "FalconSat", "Falcon 1", &[&["DARPA"]])
        }
    }

    /// The first handful of Falcon 1 flights, in provider order.
    pub fn early_falcon_launches() -> Vec<RawLaunch> {
        vec![
            falcon_sat(),
            RawLaunch {
                success: Some(false),
                ..raw_launch(2, "DemoSat", "Falcon 1", &[&["DARPA"]])
            },
            RawLaunch {
                success: Some(false),
                ..raw_launch(3, "Trailblazer", "Falcon 1", &[&["NASA"], &["ORS"]])
            },
            raw_launch(4, "RatSat", "Falcon 1", &[&["SpaceX"]]),
        ]
    }

    /// A local launch record with reasonable defaults.
    pub fn launch_record(flight_number: i64, mission: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number,
            mission: mission.to_string(),
            rocket: "Explorer IS1".to_string(),
            launch_date: Utc.with_ymd_and_hms(2030, 12, 27, 0, 0, 0).unwrap(),
            target: Some("Kepler-442 b".to_string()),
            customers: vec!["ZTM".to_string(), "NASA".to_string()],
            upcoming: true,
            success: true,
        }
    }

    /// A scheduling request aimed at `target`.
    pub fn schedule_request(mission: &str, target: &str) -> ScheduleLaunchRequest {
        ScheduleLaunchRequest {
            mission: mission.to_string(),
            rocket: "Explorer IS1".to_string(),
            launch_date: Utc.with_ymd_and_hms(2030, 12, 27, 0, 0, 0).unwrap(),
            target: target.to_string(),
            customers: Vec::new(),
        }
    }

    fn launch_site_time(year: i32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(12 * 3600)
            .unwrap()
            .with_ymd_and_hms(year, 3, 25, 10, 30, 0)
            .unwrap()
    }
}
