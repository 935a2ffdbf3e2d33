//! Per-ship progression: weighted launch points and level resolution.
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};

use crate::mission::{DurationClass, MissionRecord, MissionTypeKey, ShipType};
use crate::numbers::{ceil_f64_to_u32, round_points};
use crate::policy::{ProgressionConfig, ProgressionConfigError};

/// Number of missions flown in one duration class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationCount {
    pub duration: DurationClass,
    pub count: u32,
}

/// Missions of one duration class that would cover a launch point gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionsNeeded {
    pub duration: DurationClass,
    pub missions: u32,
}

/// Outcome of the threshold search for a point total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelResolution {
    pub level: u32,
    pub max_level: u32,
    pub to_next_level: Option<f64>,
    pub to_max_level: Option<f64>,
}

fn level_from_index(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// Resolve a level from a validated threshold sequence.
///
/// The level is one below the first threshold the total has not reached;
/// reaching every threshold caps the ship at its max level.
#[must_use]
pub fn resolve_level(thresholds: &[f64], points: f64) -> LevelResolution {
    let max_index = thresholds.len().saturating_sub(1);
    let (level, to_next_level) = match thresholds.iter().position(|target| points < *target) {
        Some(next) => (
            next.saturating_sub(1),
            Some(round_points(thresholds[next] - points)),
        ),
        None => (max_index, None),
    };
    let to_max_level = thresholds
        .last()
        .filter(|last| points < **last)
        .map(|last| round_points(last - points));

    LevelResolution {
        level: level_from_index(level),
        max_level: level_from_index(max_index),
        to_next_level,
        to_max_level,
    }
}

/// Missions of every duration class needed to earn `remaining` launch points.
///
/// # Errors
///
/// Returns an error if a duration weight is invalid.
pub fn missions_needed(
    remaining: f64,
    config: &ProgressionConfig,
) -> Result<SmallVec<[MissionsNeeded; 4]>, ProgressionConfigError> {
    DurationClass::ALL
        .into_iter()
        .map(|duration| {
            let weight = config.weight(duration)?;
            Ok(MissionsNeeded {
                duration,
                missions: ceil_f64_to_u32(round_points(remaining / weight)),
            })
        })
        .collect()
}

/// Aggregate progression for a single ship. All derived values are computed
/// once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipProgressionStats {
    ship: ShipType,
    counts: SmallVec<[DurationCount; 4]>,
    total_missions: u32,
    launch_points: f64,
    level: u32,
    max_level: u32,
    launch_points_to_next_level: Option<f64>,
    launch_points_to_max_level: Option<f64>,
    launches_to_unlock_next: Option<u32>,
    missions_to_next_level: SmallVec<[MissionsNeeded; 4]>,
    missions_to_max_level: SmallVec<[MissionsNeeded; 4]>,
}

impl ShipProgressionStats {
    /// Build stats from per-duration counts. Zero counts are dropped, repeated
    /// durations are summed, and the buckets are kept in duration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the ship's thresholds or any duration weight are
    /// malformed.
    pub fn new(
        ship: ShipType,
        counts: impl IntoIterator<Item = DurationCount>,
        config: &ProgressionConfig,
    ) -> Result<Self, ProgressionConfigError> {
        config.validate_ship(ship)?;
        let thresholds = config.thresholds(ship)?;

        let mut merged: SmallVec<[DurationCount; 4]> = SmallVec::new();
        for entry in counts.into_iter().filter(|entry| entry.count > 0) {
            match merged.iter_mut().find(|bucket| bucket.duration == entry.duration) {
                Some(bucket) => bucket.count = bucket.count.saturating_add(entry.count),
                None => merged.push(entry),
            }
        }
        merged.sort_by_key(|entry| entry.duration);
        let counts = merged;

        let mut total_missions: u32 = 0;
        let mut raw_points = 0.0;
        for entry in &counts {
            total_missions = total_missions.saturating_add(entry.count);
            raw_points += f64::from(entry.count) * config.weight(entry.duration)?;
        }
        let launch_points = round_points(raw_points);

        let resolution = resolve_level(thresholds, launch_points);
        let missions_to_next_level = match resolution.to_next_level {
            Some(remaining) => missions_needed(remaining, config)?,
            None => SmallVec::new(),
        };
        let missions_to_max_level = match resolution.to_max_level {
            Some(remaining) => missions_needed(remaining, config)?,
            None => SmallVec::new(),
        };
        let launches_to_unlock_next = config
            .unlock_requirement(ship)
            .map(|required| required.saturating_sub(total_missions));

        Ok(Self {
            ship,
            counts,
            total_missions,
            launch_points,
            level: resolution.level,
            max_level: resolution.max_level,
            launch_points_to_next_level: resolution.to_next_level,
            launch_points_to_max_level: resolution.to_max_level,
            launches_to_unlock_next,
            missions_to_next_level,
            missions_to_max_level,
        })
    }

    #[must_use]
    pub const fn ship(&self) -> ShipType {
        self.ship
    }

    /// Nonzero duration buckets in duration order.
    #[must_use]
    pub fn counts(&self) -> &[DurationCount] {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, duration: DurationClass) -> u32 {
        self.counts
            .iter()
            .find(|entry| entry.duration == duration)
            .map_or(0, |entry| entry.count)
    }

    #[must_use]
    pub const fn total_missions(&self) -> u32 {
        self.total_missions
    }

    #[must_use]
    pub const fn launch_points(&self) -> f64 {
        self.launch_points
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn max_level(&self) -> u32 {
        self.max_level
    }

    #[must_use]
    pub const fn is_max_level(&self) -> bool {
        self.level == self.max_level
    }

    /// `None` once the ship is at its max level.
    #[must_use]
    pub const fn launch_points_to_next_level(&self) -> Option<f64> {
        self.launch_points_to_next_level
    }

    /// `None` once the total reaches the final threshold.
    #[must_use]
    pub const fn launch_points_to_max_level(&self) -> Option<f64> {
        self.launch_points_to_max_level
    }

    /// `None` for the last ship, which unlocks nothing.
    #[must_use]
    pub const fn launches_to_unlock_next(&self) -> Option<u32> {
        self.launches_to_unlock_next
    }

    /// Empty once the ship is at its max level.
    #[must_use]
    pub fn missions_to_next_level(&self) -> &[MissionsNeeded] {
        &self.missions_to_next_level
    }

    /// Empty once the total reaches the final threshold.
    #[must_use]
    pub fn missions_to_max_level(&self) -> &[MissionsNeeded] {
        &self.missions_to_max_level
    }
}

/// A ship whose resolved level differs from the level stored in the save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelChange {
    pub ship: ShipType,
    pub recorded: u32,
    pub resolved: u32,
}

/// Progression for every ship with at least one launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetProgressionStats {
    config: ProgressionConfig,
    resolved_levels: BTreeMap<ShipType, u32>,
    ships: Vec<ShipProgressionStats>,
}

impl FleetProgressionStats {
    /// Configuration the stats were computed with.
    #[must_use]
    pub const fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Ships in declared order.
    #[must_use]
    pub fn ships(&self) -> &[ShipProgressionStats] {
        &self.ships
    }

    #[must_use]
    pub fn ship(&self, ship: ShipType) -> Option<&ShipProgressionStats> {
        self.ships.iter().find(|stats| stats.ship == ship)
    }

    /// Resolved current level per included ship.
    #[must_use]
    pub const fn resolved_levels(&self) -> &BTreeMap<ShipType, u32> {
        &self.resolved_levels
    }

    #[must_use]
    pub fn resolved_level(&self, ship: ShipType) -> Option<u32> {
        self.resolved_levels.get(&ship).copied()
    }

    #[must_use]
    pub fn total_missions(&self) -> u32 {
        self.ships
            .iter()
            .fold(0, |total, stats| total.saturating_add(stats.total_missions))
    }

    /// Ships whose recorded save level no longer matches the resolved level.
    #[must_use]
    pub fn level_changes(&self) -> Vec<LevelChange> {
        self.resolved_levels
            .iter()
            .filter_map(|(ship, resolved)| {
                let recorded = self.config.recorded_level(*ship)?;
                (recorded != *resolved).then_some(LevelChange {
                    ship: *ship,
                    recorded,
                    resolved: *resolved,
                })
            })
            .collect()
    }
}

/// Count launched missions per ship and duration, then resolve each ship's
/// progression. Ships without missions are omitted.
///
/// # Errors
///
/// Returns an error if a ship present in `missions` has malformed tables.
pub fn aggregate_progression(
    missions: &[MissionRecord],
    config: &ProgressionConfig,
) -> Result<FleetProgressionStats, ProgressionConfigError> {
    let mut table: HashMap<MissionTypeKey, u32> =
        MissionTypeKey::all().map(|key| (key, 0)).collect();
    for mission in missions {
        let count = table.entry(mission.key()).or_default();
        *count = count.saturating_add(1);
    }

    let mut ships = Vec::new();
    let mut resolved_levels = BTreeMap::new();
    for ship in ShipType::ALL {
        let counts: SmallVec<[DurationCount; 4]> = DurationClass::ALL
            .into_iter()
            .map(|duration| DurationCount {
                duration,
                count: table
                    .get(&MissionTypeKey::new(ship, duration))
                    .copied()
                    .unwrap_or(0),
            })
            .filter(|entry| entry.count > 0)
            .collect();
        if counts.is_empty() {
            continue;
        }

        let stats = ShipProgressionStats::new(ship, counts, config)?;
        log::debug!(
            "{ship}: {} missions, {:.1} launch points, level {}/{}",
            stats.total_missions,
            stats.launch_points,
            stats.level,
            stats.max_level
        );
        if let Some(recorded) = config.recorded_level(ship) {
            if recorded != stats.level {
                log::warn!(
                    "{ship}: save records level {recorded} but launches resolve to level {}",
                    stats.level
                );
            }
        }
        resolved_levels.insert(ship, stats.level);
        ships.push(stats);
    }

    Ok(FleetProgressionStats {
        config: config.clone(),
        resolved_levels,
        ships,
    })
}
