//! Mission records as produced by the save decoder.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spaceship variants, in the order the game unlocks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    ChickenOne,
    ChickenNine,
    ChickenHeavy,
    Bcr,
    MilleniumChicken,
    CorellihenCorvette,
    Galeggtica,
    Chickfiant,
    Voyegger,
    Henerprise,
    Atreggies,
}

impl ShipType {
    /// Every ship in declared order.
    pub const ALL: [Self; 11] = [
        Self::ChickenOne,
        Self::ChickenNine,
        Self::ChickenHeavy,
        Self::Bcr,
        Self::MilleniumChicken,
        Self::CorellihenCorvette,
        Self::Galeggtica,
        Self::Chickfiant,
        Self::Voyegger,
        Self::Henerprise,
        Self::Atreggies,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChickenOne => "CHICKEN_ONE",
            Self::ChickenNine => "CHICKEN_NINE",
            Self::ChickenHeavy => "CHICKEN_HEAVY",
            Self::Bcr => "BCR",
            Self::MilleniumChicken => "MILLENIUM_CHICKEN",
            Self::CorellihenCorvette => "CORELLIHEN_CORVETTE",
            Self::Galeggtica => "GALEGGTICA",
            Self::Chickfiant => "CHICKFIANT",
            Self::Voyegger => "VOYEGGER",
            Self::Henerprise => "HENERPRISE",
            Self::Atreggies => "ATREGGIES",
        }
    }

    /// Player-facing ship name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChickenOne => "Chicken One",
            Self::ChickenNine => "Chicken Nine",
            Self::ChickenHeavy => "Chicken Heavy",
            Self::Bcr => "BCR",
            Self::MilleniumChicken => "Quintillion Chicken",
            Self::CorellihenCorvette => "Cornish-Hen Corvette",
            Self::Galeggtica => "Galeggtica",
            Self::Chickfiant => "Defihent",
            Self::Voyegger => "Voyegger",
            Self::Henerprise => "Henerprise",
            Self::Atreggies => "Atreggies Henliner",
        }
    }

    /// The ship unlocked by launching this one enough times.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let index = Self::ALL.iter().position(|ship| *ship == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mission length category. Tutorial and short missions earn the same credit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationClass {
    Tutorial,
    Short,
    Long,
    Epic,
}

impl DurationClass {
    pub const ALL: [Self; 4] = [Self::Tutorial, Self::Short, Self::Long, Self::Epic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tutorial => "tutorial",
            Self::Short => "short",
            Self::Long => "long",
            Self::Epic => "epic",
        }
    }
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mission lifecycle. Ordering follows the declaration, so anything at or
/// past `Exploring` has left the ground.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    #[default]
    Fueling,
    PrepareToLaunch,
    Exploring,
    Returned,
    Analyzing,
    Complete,
    Archived,
}

impl MissionStatus {
    #[must_use]
    pub fn is_launched(self) -> bool {
        self >= Self::Exploring
    }
}

/// Bucket identifier for progression counting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MissionTypeKey {
    pub ship: ShipType,
    pub duration: DurationClass,
}

impl MissionTypeKey {
    #[must_use]
    pub const fn new(ship: ShipType, duration: DurationClass) -> Self {
        Self { ship, duration }
    }

    /// Every ship/duration combination, ship-major.
    pub fn all() -> impl Iterator<Item = Self> {
        ShipType::ALL.into_iter().flat_map(|ship| {
            DurationClass::ALL
                .into_iter()
                .map(move |duration| Self::new(ship, duration))
        })
    }
}

/// A single mission instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub id: String,
    pub ship: ShipType,
    pub duration: DurationClass,
    #[serde(default)]
    pub status: MissionStatus,
    /// Derived start time, epoch seconds.
    #[serde(default)]
    pub start_time: f64,
    /// Launch time, epoch seconds. Absent for missions still on the pad.
    #[serde(default)]
    pub launched_at: Option<f64>,
}

impl MissionRecord {
    #[must_use]
    pub const fn key(&self) -> MissionTypeKey {
        MissionTypeKey::new(self.ship, self.duration)
    }
}

/// Both mission collections carried by the save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MissionArchive {
    #[serde(default)]
    pub archive: Vec<MissionRecord>,
    #[serde(default)]
    pub current: Vec<MissionRecord>,
}
