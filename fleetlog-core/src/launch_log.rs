//! Day-grouped launch history.
//!
//! Missions are bucketed by the calendar day of their launch, days are ordered
//! newest first, and each day lists its launches newest first. A trailing
//! window filter narrows the log to the most recent days.
use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use thiserror::Error;

use crate::mission::{MissionRecord, ShipType};
use crate::numbers::secs_to_millis;

/// Errors raised while building the launch log. Any of these means the save
/// decoder produced a corrupt launched mission.
#[derive(Debug, Error, PartialEq)]
pub enum LaunchLogError {
    #[error("mission {mission_id} was launched but has no launch time")]
    MissingTimestamp { mission_id: String },
    #[error("mission {mission_id} has an unusable launch time ({value})")]
    TimestampOutOfRange { mission_id: String, value: f64 },
}

/// Which clock decides where one day ends and the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// The player's local midnight.
    #[default]
    Local,
    /// UTC midnight.
    Utc,
}

impl DayBoundary {
    #[must_use]
    pub fn day_of(self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Utc => instant.date_naive(),
        }
    }

    #[must_use]
    pub fn today(self) -> NaiveDate {
        self.day_of(Utc::now())
    }
}

/// A launched mission with its resolved launch instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchEntry {
    pub launched_at: DateTime<Utc>,
    pub mission: MissionRecord,
}

impl LaunchEntry {
    /// Resolve the launch instant of a mission.
    ///
    /// # Errors
    ///
    /// Returns an error if the mission has no launch time or it cannot be
    /// represented as a UTC instant.
    pub fn from_mission(mission: &MissionRecord) -> Result<Self, LaunchLogError> {
        let value = mission
            .launched_at
            .ok_or_else(|| LaunchLogError::MissingTimestamp {
                mission_id: mission.id.clone(),
            })?;
        let launched_at = secs_to_millis(value)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or_else(|| LaunchLogError::TimestampOutOfRange {
                mission_id: mission.id.clone(),
                value,
            })?;
        Ok(Self {
            launched_at,
            mission: mission.clone(),
        })
    }
}

/// Launches that happened on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLaunchLog {
    day: NaiveDate,
    missions: Vec<LaunchEntry>,
}

impl DailyLaunchLog {
    /// Orders `missions` newest launch first.
    #[must_use]
    pub fn new(day: NaiveDate, mut missions: Vec<LaunchEntry>) -> Self {
        missions.sort_by(|a, b| b.launched_at.cmp(&a.launched_at));
        Self { day, missions }
    }

    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.day
    }

    #[must_use]
    pub fn missions(&self) -> &[LaunchEntry] {
        &self.missions
    }

    /// Launches per ship on this day.
    #[must_use]
    pub fn ship_counts(&self) -> BTreeMap<ShipType, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.missions {
            *counts.entry(entry.mission.ship).or_insert(0) += 1;
        }
        counts
    }
}

/// Launch history grouped by day, newest day first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchLog {
    boundary: DayBoundary,
    days: Vec<DailyLaunchLog>,
}

impl LaunchLog {
    /// Group launched missions by the day they launched.
    ///
    /// # Errors
    ///
    /// Fails on the first mission without a usable launch time; no partial log
    /// is produced.
    pub fn build(
        missions: &[MissionRecord],
        boundary: DayBoundary,
    ) -> Result<Self, LaunchLogError> {
        let mut by_day: HashMap<NaiveDate, Vec<LaunchEntry>> = HashMap::new();
        for mission in missions {
            let entry = LaunchEntry::from_mission(mission)?;
            by_day
                .entry(boundary.day_of(entry.launched_at))
                .or_default()
                .push(entry);
        }

        let mut days: Vec<DailyLaunchLog> = by_day
            .into_iter()
            .map(|(day, entries)| DailyLaunchLog::new(day, entries))
            .collect();
        days.sort_by(|a, b| b.day.cmp(&a.day));

        log::debug!(
            "grouped {} launches into {} days ({boundary:?} boundary)",
            missions.len(),
            days.len()
        );
        Ok(Self { boundary, days })
    }

    #[must_use]
    pub const fn boundary(&self) -> DayBoundary {
        self.boundary
    }

    /// Every day, newest first.
    #[must_use]
    pub fn days(&self) -> &[DailyLaunchLog] {
        &self.days
    }

    #[must_use]
    pub fn mission_count(&self) -> usize {
        self.days.iter().map(|day| day.missions.len()).sum()
    }

    /// Days in `[today - (last_days - 1), today]`, or every day when
    /// `last_days` is `None`.
    #[must_use]
    pub fn filtered(&self, last_days: Option<NonZeroU32>, today: NaiveDate) -> &[DailyLaunchLog] {
        let Some(window) = last_days else {
            return &self.days;
        };
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(window.get() - 1)))
            .unwrap_or(NaiveDate::MIN);
        let start = self.days.partition_point(|day| day.day > today);
        let end = self.days.partition_point(|day| day.day >= cutoff);
        &self.days[start..end]
    }

    /// [`LaunchLog::filtered`] relative to the current day under this log's
    /// boundary.
    #[must_use]
    pub fn filtered_now(&self, last_days: Option<NonZeroU32>) -> &[DailyLaunchLog] {
        self.filtered(last_days, self.boundary.today())
    }
}
