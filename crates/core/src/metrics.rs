//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog synchronization (runs, launches written)
//! - The external launch provider
//! - Scheduling and aborting launches

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Synchronization
// =============================================================================

/// Bootstrap attempts by outcome.
pub static SYNC_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("launchpad_sync_runs_total", "Total catalog bootstrap attempts"),
        &["result"], // "already_loaded", "populated", "failed"
    )
    .unwrap()
});

/// Launches written by synchronization.
pub static LAUNCHES_SYNCED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "launchpad_launches_synced_total",
        "Total launches upserted from the external provider",
    )
    .unwrap()
});

// =============================================================================
// External provider
// =============================================================================

/// Provider request duration.
pub static PROVIDER_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "launchpad_provider_request_duration_seconds",
            "Duration of launch provider queries",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["status"], // "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Scheduling
// =============================================================================

/// Launches scheduled locally.
pub static LAUNCHES_SCHEDULED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "launchpad_launches_scheduled_total",
        "Total launches scheduled",
    )
    .unwrap()
});

/// Scheduling requests rejected because the target is unknown.
pub static SCHEDULE_REJECTIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "launchpad_schedule_target_not_found_total",
        "Scheduling requests with an unknown target",
    )
    .unwrap()
});

/// Abort requests by result.
pub static LAUNCHES_ABORTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("launchpad_abort_requests_total", "Total abort requests"),
        &["result"], // "aborted", "not_found"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SYNC_RUNS.clone()),
        Box::new(LAUNCHES_SYNCED.clone()),
        Box::new(PROVIDER_REQUEST_DURATION.clone()),
        Box::new(LAUNCHES_SCHEDULED.clone()),
        Box::new(SCHEDULE_REJECTIONS.clone()),
        Box::new(LAUNCHES_ABORTED.clone()),
    ]
}
