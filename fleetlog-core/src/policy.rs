//! Level, weight and unlock tables that drive ship progression.
//!
//! The compiled-in defaults mirror the game's balance data. Any table can be
//! replaced from JSON; omitted tables keep their defaults.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::mission::{DurationClass, ShipType};

/// Errors raised when progression tables cannot produce a meaningful level.
#[derive(Debug, Error, PartialEq)]
pub enum ProgressionConfigError {
    #[error("no level thresholds configured for {ship}")]
    MissingThresholds { ship: ShipType },
    #[error("level threshold {level} for {ship} is not finite")]
    NonFiniteThreshold { ship: ShipType, level: usize },
    #[error("level thresholds for {ship} must start at 0 (got {first})")]
    NonZeroBaseThreshold { ship: ShipType, first: f64 },
    #[error("level thresholds for {ship} decrease at level {level} ({previous} > {value})")]
    DecreasingThresholds {
        ship: ShipType,
        level: usize,
        previous: f64,
        value: f64,
    },
    #[error("launch point weight for {duration} must be positive and finite (got {value:?})")]
    InvalidWeight {
        duration: DurationClass,
        value: Option<f64>,
    },
}

/// Balance tables consumed by the progression aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Cumulative launch points required for each level, indexed by level.
    #[serde(default = "ProgressionConfig::default_level_thresholds")]
    pub level_thresholds: BTreeMap<ShipType, Vec<f64>>,
    /// Launch points awarded per mission of each duration class.
    #[serde(default = "ProgressionConfig::default_duration_weights")]
    pub duration_weights: BTreeMap<DurationClass, f64>,
    /// Total launches of a ship required to unlock the next one.
    #[serde(default = "ProgressionConfig::default_unlock_requirements")]
    pub unlock_requirements: BTreeMap<ShipType, u32>,
    /// Ship levels as recorded in the save, if known.
    #[serde(default)]
    pub recorded_levels: BTreeMap<ShipType, u32>,
}

impl ProgressionConfig {
    fn default_level_thresholds() -> BTreeMap<ShipType, Vec<f64>> {
        const TABLES: &[(ShipType, &[f64])] = &[
            (ShipType::ChickenOne, &[0.0, 5.0, 12.0, 24.0]),
            (ShipType::ChickenNine, &[0.0, 6.0, 15.0, 30.0, 50.0]),
            (ShipType::ChickenHeavy, &[0.0, 12.0, 30.0, 60.0, 100.0]),
            (ShipType::Bcr, &[0.0, 15.0, 40.0, 80.0, 130.0, 200.0]),
            (
                ShipType::MilleniumChicken,
                &[0.0, 18.0, 50.0, 100.0, 165.0, 250.0],
            ),
            (
                ShipType::CorellihenCorvette,
                &[0.0, 21.0, 60.0, 120.0, 200.0, 300.0, 420.0],
            ),
            (
                ShipType::Galeggtica,
                &[0.0, 24.0, 70.0, 140.0, 230.0, 350.0, 500.0],
            ),
            (
                ShipType::Chickfiant,
                &[0.0, 27.0, 80.0, 160.0, 260.0, 400.0, 570.0, 780.0],
            ),
            (
                ShipType::Voyegger,
                &[0.0, 30.0, 90.0, 180.0, 300.0, 450.0, 650.0, 900.0],
            ),
            (
                ShipType::Henerprise,
                &[
                    0.0, 40.0, 120.0, 240.0, 400.0, 600.0, 850.0, 1150.0, 1500.0,
                ],
            ),
            (
                ShipType::Atreggies,
                &[
                    0.0, 50.0, 150.0, 300.0, 500.0, 750.0, 1050.0, 1400.0, 1800.0,
                ],
            ),
        ];
        TABLES
            .iter()
            .map(|(ship, thresholds)| (*ship, thresholds.to_vec()))
            .collect()
    }

    fn default_duration_weights() -> BTreeMap<DurationClass, f64> {
        BTreeMap::from([
            (DurationClass::Tutorial, 1.0),
            (DurationClass::Short, 1.0),
            (DurationClass::Long, 1.4),
            (DurationClass::Epic, 1.8),
        ])
    }

    fn default_unlock_requirements() -> BTreeMap<ShipType, u32> {
        BTreeMap::from([
            (ShipType::ChickenOne, 4),
            (ShipType::ChickenNine, 6),
            (ShipType::ChickenHeavy, 12),
            (ShipType::Bcr, 15),
            (ShipType::MilleniumChicken, 18),
            (ShipType::CorellihenCorvette, 21),
            (ShipType::Galeggtica, 24),
            (ShipType::Chickfiant, 27),
            (ShipType::Voyegger, 30),
            (ShipType::Henerprise, 40),
        ])
    }

    /// Load configuration overrides from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Attach the per-ship levels recorded in a save.
    #[must_use]
    pub fn with_recorded_levels(mut self, levels: BTreeMap<ShipType, u32>) -> Self {
        self.recorded_levels = levels;
        self
    }

    #[must_use]
    pub fn recorded_level(&self, ship: ShipType) -> Option<u32> {
        self.recorded_levels.get(&ship).copied()
    }

    /// Launches required to unlock the ship after `ship`; `None` for the last ship.
    #[must_use]
    pub fn unlock_requirement(&self, ship: ShipType) -> Option<u32> {
        self.unlock_requirements.get(&ship).copied()
    }

    /// Validated threshold sequence for a ship.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing, empty, non-finite, does not
    /// start at zero, or decreases.
    pub fn thresholds(&self, ship: ShipType) -> Result<&[f64], ProgressionConfigError> {
        let thresholds = self
            .level_thresholds
            .get(&ship)
            .map(Vec::as_slice)
            .filter(|table| !table.is_empty())
            .ok_or(ProgressionConfigError::MissingThresholds { ship })?;

        if let Some(level) = thresholds.iter().position(|value| !value.is_finite()) {
            return Err(ProgressionConfigError::NonFiniteThreshold { ship, level });
        }
        let first = thresholds[0];
        if first != 0.0 {
            return Err(ProgressionConfigError::NonZeroBaseThreshold { ship, first });
        }
        for (index, pair) in thresholds.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(ProgressionConfigError::DecreasingThresholds {
                    ship,
                    level: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }
        Ok(thresholds)
    }

    /// Launch points per mission of the given duration class.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is missing, non-finite or not positive.
    pub fn weight(&self, duration: DurationClass) -> Result<f64, ProgressionConfigError> {
        match self.duration_weights.get(&duration).copied() {
            Some(value) if value.is_finite() && value > 0.0 => Ok(value),
            value => Err(ProgressionConfigError::InvalidWeight { duration, value }),
        }
    }

    /// Check every table a ship's statistics depend on.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation found.
    pub fn validate_ship(&self, ship: ShipType) -> Result<(), ProgressionConfigError> {
        self.thresholds(ship)?;
        for duration in DurationClass::ALL {
            self.weight(duration)?;
        }
        Ok(())
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            level_thresholds: Self::default_level_thresholds(),
            duration_weights: Self::default_duration_weights(),
            unlock_requirements: Self::default_unlock_requirements(),
            recorded_levels: BTreeMap::new(),
        }
    }
}
