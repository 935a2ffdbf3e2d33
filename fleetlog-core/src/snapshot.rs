//! Decoded save snapshot and the combined analysis entry point.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::launch_log::{DayBoundary, LaunchLog, LaunchLogError};
use crate::mission::{MissionArchive, ShipType};
use crate::policy::{ProgressionConfig, ProgressionConfigError};
use crate::progression::{FleetProgressionStats, aggregate_progression};

/// Either pipeline failing while analysing a snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error(transparent)]
    LaunchLog(#[from] LaunchLogError),
    #[error("invalid progression configuration: {0}")]
    InvalidConfiguration(#[from] ProgressionConfigError),
}

/// Progress section of the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub ship_levels: BTreeMap<ShipType, u32>,
}

/// The slice of a decoded save the statistics need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SaveSnapshot {
    #[serde(default)]
    pub artifacts: MissionArchive,
    #[serde(default)]
    pub progress: ProgressSnapshot,
}

/// Results of both pipelines over one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotAnalysis {
    pub progression: FleetProgressionStats,
    pub launch_log: LaunchLog,
}

impl SaveSnapshot {
    /// Load a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Progression configuration overlaid with this save's recorded levels.
    #[must_use]
    pub fn progression_config(&self, base: ProgressionConfig) -> ProgressionConfig {
        base.with_recorded_levels(self.progress.ship_levels.clone())
    }

    /// Select launched missions once and feed both pipelines.
    ///
    /// # Errors
    ///
    /// Returns an error if the progression tables are malformed for a flown
    /// ship or a launched mission has no usable launch time.
    pub fn analyze(
        &self,
        config: ProgressionConfig,
        boundary: DayBoundary,
    ) -> Result<SnapshotAnalysis, StatsError> {
        let launched = self.artifacts.launched_missions();
        let config = self.progression_config(config);
        let progression = aggregate_progression(&launched, &config)?;
        let launch_log = LaunchLog::build(&launched, boundary)?;
        Ok(SnapshotAnalysis {
            progression,
            launch_log,
        })
    }
}
