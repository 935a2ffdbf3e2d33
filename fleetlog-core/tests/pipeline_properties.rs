use std::collections::HashSet;
use std::num::NonZeroU32;

use chrono::{Days, NaiveDate};
use fleetlog_core::numbers::i64_to_f64;
use fleetlog_core::{
    DayBoundary, DurationClass, LaunchLog, MissionArchive, MissionRecord, MissionStatus,
    ProgressionConfig, SaveSnapshot, ShipType, aggregate_progression, resolve_level,
    select_launched,
};

const BASE_EPOCH: i64 = 1_704_067_200; // 2024-01-01T00:00:00Z
const STATUSES: [MissionStatus; 7] = [
    MissionStatus::Fueling,
    MissionStatus::PrepareToLaunch,
    MissionStatus::Exploring,
    MissionStatus::Returned,
    MissionStatus::Analyzing,
    MissionStatus::Complete,
    MissionStatus::Archived,
];

fn synthetic_archive(count: usize) -> MissionArchive {
    let mut archive = MissionArchive::default();
    for index in 0..count {
        let step = i64::try_from(index).expect("index fits");
        // Spread launches unevenly across roughly three weeks.
        let offset = (step * 7_919) % (21 * 86_400) + step;
        let ship = ShipType::ALL[(index * 5) % ShipType::ALL.len()];
        let duration = DurationClass::ALL[(index * 3) % DurationClass::ALL.len()];
        let status = STATUSES[index % STATUSES.len()];
        let launched = status.is_launched();
        let secs = i64_to_f64(BASE_EPOCH + offset);
        let record = MissionRecord {
            id: format!("mission-{index}"),
            ship,
            duration,
            status,
            start_time: secs,
            launched_at: launched.then_some(secs),
        };
        if index % 4 == 0 {
            archive.current.push(record);
        } else {
            archive.archive.push(record);
        }
    }
    archive
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

#[test]
fn selection_keeps_only_launched_missions_in_time_order() {
    let archive = synthetic_archive(300);
    let launched = archive.launched_missions();
    let expected = archive
        .archive
        .iter()
        .chain(&archive.current)
        .filter(|m| m.status >= MissionStatus::Exploring)
        .count();
    assert_eq!(launched.len(), expected);
    assert!(launched.iter().all(|m| m.status.is_launched()));
    assert!(
        launched
            .windows(2)
            .all(|pair| pair[0].start_time <= pair[1].start_time)
    );
    assert_eq!(
        select_launched(&archive.archive, &archive.current),
        launched
    );
}

#[test]
fn buckets_conserve_every_launched_mission() {
    let launched = synthetic_archive(300).launched_missions();
    let fleet = aggregate_progression(&launched, &ProgressionConfig::default())
        .expect("default tables are valid");

    for stats in fleet.ships() {
        let bucket_total: u32 = stats.counts().iter().map(|c| c.count).sum();
        assert_eq!(bucket_total, stats.total_missions(), "{}", stats.ship());
        assert!(stats.counts().iter().all(|c| c.count > 0));
        assert_eq!(
            stats.launch_points_to_next_level().is_none(),
            stats.is_max_level()
        );
        assert_eq!(
            stats.missions_to_next_level().is_empty(),
            stats.is_max_level()
        );
        if let Some(remaining) = stats.launch_points_to_max_level() {
            assert!(remaining > 0.0);
        }
    }
    assert_eq!(
        usize::try_from(fleet.total_missions()).expect("fits"),
        launched.len()
    );

    let order: Vec<_> = fleet.ships().iter().map(|s| s.ship()).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

#[test]
fn log_partitions_missions_into_sorted_days() {
    let launched = synthetic_archive(300).launched_missions();
    let log = LaunchLog::build(&launched, DayBoundary::Utc).expect("all launched have times");

    let mut seen = HashSet::new();
    for day in log.days() {
        for entry in day.missions() {
            assert!(seen.insert(entry.mission.id.clone()), "duplicate {}", entry.mission.id);
            assert_eq!(entry.launched_at.date_naive(), day.day());
            assert!(entry.mission.status.is_launched());
        }
        assert!(
            day.missions()
                .windows(2)
                .all(|pair| pair[0].launched_at >= pair[1].launched_at)
        );
    }
    assert_eq!(seen.len(), launched.len());
    assert_eq!(log.mission_count(), launched.len());
    assert!(log.days().windows(2).all(|pair| pair[0].day() > pair[1].day()));
}

#[test]
fn trailing_window_matches_calendar_range() {
    let launched = synthetic_archive(300).launched_missions();
    let log = LaunchLog::build(&launched, DayBoundary::Utc).expect("valid log");
    let today = base_day()
        .checked_add_days(Days::new(22))
        .expect("valid date");

    for n in 1..=25_u32 {
        let window = NonZeroU32::new(n);
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(n - 1)))
            .expect("valid date");
        let filtered = log.filtered(window, today);
        let expected: Vec<_> = log
            .days()
            .iter()
            .filter(|day| day.day() >= cutoff && day.day() <= today)
            .collect();
        assert_eq!(filtered.iter().collect::<Vec<_>>(), expected, "window {n}");
    }
    assert_eq!(log.filtered(None, today), log.days());

    // A `today` inside the launch range excludes the newer days.
    let midpoint = base_day()
        .checked_add_days(Days::new(10))
        .expect("valid date");
    assert!(log.days()[0].day() > midpoint);
    for n in 1..=12_u32 {
        let cutoff = midpoint
            .checked_sub_days(Days::new(u64::from(n - 1)))
            .expect("valid date");
        let filtered = log.filtered(NonZeroU32::new(n), midpoint);
        assert!(
            filtered
                .iter()
                .all(|day| day.day() >= cutoff && day.day() <= midpoint),
            "window {n}"
        );
        let expected = log
            .days()
            .iter()
            .filter(|day| day.day() >= cutoff && day.day() <= midpoint)
            .count();
        assert_eq!(filtered.len(), expected, "window {n}");
    }
}

#[test]
fn more_missions_never_lower_a_level() {
    let config = ProgressionConfig::default();
    let mut previous = 0;
    for launches in 0..200_u32 {
        let missions: Vec<MissionRecord> = (0..launches)
            .map(|index| MissionRecord {
                id: format!("v-{index}"),
                ship: ShipType::Voyegger,
                duration: if index % 2 == 0 {
                    DurationClass::Long
                } else {
                    DurationClass::Short
                },
                status: MissionStatus::Complete,
                start_time: f64::from(index),
                launched_at: Some(f64::from(index)),
            })
            .collect();
        let fleet = aggregate_progression(&missions, &config).expect("valid tables");
        let level = fleet.resolved_level(ShipType::Voyegger).unwrap_or(0);
        assert!(level >= previous, "level dropped at {launches} launches");
        previous = level;
    }
    assert_eq!(previous, 3);
}

#[test]
fn documented_threshold_example_holds() {
    let resolution = resolve_level(&[0.0, 10.0, 25.0, 50.0], 12.0);
    assert_eq!(resolution.level, 1);
    assert_eq!(resolution.to_next_level, Some(13.0));
    assert_eq!(resolution.to_max_level, Some(38.0));
}

#[test]
fn unlaunched_missions_never_reach_either_view() {
    let snapshot = SaveSnapshot {
        artifacts: MissionArchive {
            archive: Vec::new(),
            current: vec![MissionRecord {
                id: "pad".to_string(),
                ship: ShipType::Bcr,
                duration: DurationClass::Epic,
                status: MissionStatus::PrepareToLaunch,
                start_time: 10.0,
                launched_at: None,
            }],
        },
        ..SaveSnapshot::default()
    };
    let analysis = snapshot
        .analyze(ProgressionConfig::default(), DayBoundary::Utc)
        .expect("nothing launched");
    assert!(analysis.progression.ships().is_empty());
    assert!(analysis.launch_log.days().is_empty());
}
