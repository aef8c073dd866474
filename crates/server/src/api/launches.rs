//! Launch API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use launchpad_core::{
    get_pagination, LaunchRecord, PageParams, ScheduleError, ScheduleLaunchRequest,
};

use super::handlers::{api_error, internal_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for scheduling a launch.
///
/// Every field is optional here so that missing ones produce our own 400
/// instead of the extractor's rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLaunchBody {
    pub mission: Option<String>,
    pub rocket: Option<String>,
    pub launch_date: Option<String>,
    pub target: Option<String>,
    pub customers: Option<Vec<String>>,
}

/// Response for a successful abort.
#[derive(Debug, Serialize)]
pub struct AbortResponse {
    pub ok: bool,
}

impl CreateLaunchBody {
    fn into_request(self) -> Result<ScheduleLaunchRequest, ApiError> {
        let (Some(mission), Some(rocket), Some(launch_date), Some(target)) =
            (self.mission, self.rocket, self.launch_date, self.target)
        else {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Missing required launch property",
            ));
        };

        if [&mission, &rocket, &launch_date, &target]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Missing required launch property",
            ));
        }

        let launch_date = parse_launch_date(&launch_date)
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Invalid launch date"))?;

        Ok(ScheduleLaunchRequest {
            mission,
            rocket,
            launch_date,
            target,
            customers: self.customers.unwrap_or_default(),
        })
    }
}

/// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD` dates and long-form
/// dates such as `December 27, 2030`. Date-only values mean midnight UTC.
fn parse_launch_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%B %d %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Handlers
// ============================================================================

/// List launches, optionally paginated with `page` and `limit`.
pub async fn list_launches(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<LaunchRecord>>, ApiError> {
    let pagination = get_pagination(&params);
    debug!(
        skip = pagination.skip,
        limit = pagination.limit,
        "Listing launches"
    );

    state
        .launches()
        .find_page(pagination.skip, pagination.limit)
        .map(Json)
        .map_err(internal_error)
}

/// Schedule a new launch.
pub async fn create_launch(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateLaunchBody>,
) -> Result<(StatusCode, Json<LaunchRecord>), ApiError> {
    let request = body.into_request()?;

    match state.scheduler().schedule(request) {
        Ok(launch) => Ok((StatusCode::CREATED, Json(launch))),
        Err(ScheduleError::TargetNotFound(_)) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "No matching planet was found",
        )),
        Err(e) => Err(internal_error(e)),
    }
}

/// Abort a launch by flight number.
pub async fn abort_launch(
    State(state): State<Arc<AppState>>,
    Path(flight_number): Path<String>,
) -> Result<Json<AbortResponse>, ApiError> {
    let not_found = || api_error(StatusCode::NOT_FOUND, "Launch not found");

    let flight_number: i64 = flight_number.parse().map_err(|_| not_found())?;

    if !state
        .aborter()
        .exists(flight_number)
        .map_err(internal_error)?
    {
        return Err(not_found());
    }

    match state.aborter().abort(flight_number) {
        Ok(true) => Ok(Json(AbortResponse { ok: true })),
        Ok(false) => Err(api_error(StatusCode::BAD_REQUEST, "Launch not aborted")),
        Err(e) => Err(internal_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn body(launch_date: &str) -> CreateLaunchBody {
        CreateLaunchBody {
            mission: Some("Kepler Exploration X".to_string()),
            rocket: Some("Explorer IS1".to_string()),
            launch_date: Some(launch_date.to_string()),
            target: Some("Kepler-442 b".to_string()),
            customers: None,
        }
    }

    #[test]
    fn test_parse_launch_date_formats() {
        let expected = Utc.with_ymd_and_hms(2030, 12, 27, 0, 0, 0).unwrap();
        assert_eq!(parse_launch_date("2030-12-27T00:00:00Z"), Some(expected));
        assert_eq!(parse_launch_date("2030-12-27"), Some(expected));
        assert_eq!(parse_launch_date("December 27, 2030"), Some(expected));
        assert_eq!(parse_launch_date("Dec 27, 2030"), Some(expected));
    }

    #[test]
    fn test_parse_launch_date_with_offset() {
        assert_eq!(
            parse_launch_date("2030-12-27T02:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2030, 12, 27, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_launch_date_rejects_garbage() {
        assert_eq!(parse_launch_date("zoot"), None);
        assert_eq!(parse_launch_date("2030-13-45"), None);
    }

    #[test]
    fn test_into_request_fills_customers() {
        let request = body("2030-12-27").into_request().unwrap();
        assert!(request.customers.is_empty());
        assert_eq!(request.target, "Kepler-442 b");
    }

    #[test]
    fn test_into_request_missing_field() {
        let mut b = body("2030-12-27");
        b.rocket = None;
        let (status, Json(err)) = b.into_request().unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "Missing required launch property");
    }

    #[test]
    fn test_into_request_blank_field() {
        let mut b = body("2030-12-27");
        b.mission = Some("  ".to_string());
        let (status, _) = b.into_request().unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_request_bad_date() {
        let (status, Json(err)) = body("not a date").into_request().unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "Invalid launch date");
    }
}
