//! Planet API handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use launchpad_core::Planet;

use super::handlers::{internal_error, ApiError};
use crate::state::AppState;

/// List the destinations launches can target.
pub async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Planet>>, ApiError> {
    state.planets().list().map(Json).map_err(internal_error)
}
