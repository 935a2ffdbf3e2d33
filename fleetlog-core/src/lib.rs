//! Fleetlog Statistics Core
//!
//! Derived progression statistics for spaceship missions read from a decoded
//! save snapshot. Two independent views are produced from the same launched
//! mission stream: per-ship progression (launch points, levels, unlock
//! countdowns) and a day-grouped launch log with a trailing-window filter.
//! This crate performs no I/O.

pub mod launch_log;
pub mod mission;
pub mod numbers;
pub mod policy;
pub mod progression;
pub mod selector;
pub mod snapshot;

// Re-export commonly used types
pub use launch_log::{DailyLaunchLog, DayBoundary, LaunchEntry, LaunchLog, LaunchLogError};
pub use mission::{
    DurationClass, MissionArchive, MissionRecord, MissionStatus, MissionTypeKey, ShipType,
};
pub use policy::{ProgressionConfig, ProgressionConfigError};
pub use progression::{
    DurationCount, FleetProgressionStats, LevelChange, LevelResolution, MissionsNeeded,
    ShipProgressionStats, aggregate_progression, missions_needed, resolve_level,
};
pub use selector::select_launched;
pub use snapshot::{ProgressSnapshot, SaveSnapshot, SnapshotAnalysis, StatsError};
