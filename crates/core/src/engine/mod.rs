//! Request-time operations on the launch catalog.
//!
//! Scheduling validates the destination and allocates a flight number;
//! aborting flips the status fields of an existing launch.

mod abort;
mod schedule;

pub use abort::LaunchAborter;
pub use schedule::{LaunchScheduler, ScheduleError, ScheduleLaunchRequest};
