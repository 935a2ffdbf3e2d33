//! Launched-mission selection shared by both statistics pipelines.
use crate::mission::{MissionArchive, MissionRecord};

/// Merge archived and in-flight missions, keeping only those that launched,
/// ordered by start time.
///
/// The sort is stable: archived missions precede current ones when their
/// start times tie.
#[must_use]
pub fn select_launched(archive: &[MissionRecord], current: &[MissionRecord]) -> Vec<MissionRecord> {
    let mut launched: Vec<MissionRecord> = archive
        .iter()
        .chain(current)
        .filter(|mission| mission.status.is_launched())
        .cloned()
        .collect();
    launched.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    launched
}

impl MissionArchive {
    /// Launched missions from both collections in chronological order.
    #[must_use]
    pub fn launched_missions(&self) -> Vec<MissionRecord> {
        select_launched(&self.archive, &self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::{DurationClass, MissionStatus, ShipType};

    fn mission(id: &str, status: MissionStatus, start_time: f64) -> MissionRecord {
        MissionRecord {
            id: id.to_string(),
            ship: ShipType::ChickenOne,
            duration: DurationClass::Short,
            status,
            start_time,
            launched_at: Some(start_time),
        }
    }

    #[test]
    fn drops_missions_still_on_the_pad() {
        let archive = vec![
            mission("a", MissionStatus::Complete, 30.0),
            mission("b", MissionStatus::Fueling, 10.0),
        ];
        let current = vec![
            mission("c", MissionStatus::PrepareToLaunch, 5.0),
            mission("d", MissionStatus::Exploring, 20.0),
        ];
        let ids: Vec<_> = select_launched(&archive, &current)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["d", "a"]);
    }

    #[test]
    fn ties_keep_archive_first() {
        let archive = vec![mission("old", MissionStatus::Archived, 100.0)];
        let current = vec![mission("new", MissionStatus::Exploring, 100.0)];
        let ids: Vec<_> = select_launched(&archive, &current)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["old", "new"]);
    }

    #[test]
    fn empty_archive_yields_nothing() {
        assert!(MissionArchive::default().launched_missions().is_empty());
    }
}
