use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use fleetlog_core::{
    DailyLaunchLog, DayBoundary, FleetProgressionStats, MissionsNeeded, ShipProgressionStats,
};
use serde::Serialize;
use std::io::Write;
use std::num::NonZeroU32;

/// Everything a report renders. Either view may be absent.
#[derive(Debug, Serialize)]
pub struct FleetReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progression: Option<&'a FleetProgressionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_log: Option<LaunchLogReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LaunchLogReport<'a> {
    pub boundary: DayBoundary,
    pub today: NaiveDate,
    pub window_days: Option<NonZeroU32>,
    pub days: &'a [DailyLaunchLog],
}

fn format_points(points: Option<f64>) -> String {
    points.map_or_else(|| "maxed".to_string(), |value| format!("+{value:.1}"))
}

fn format_needed(needed: &[MissionsNeeded]) -> String {
    if needed.is_empty() {
        return "-".to_string();
    }
    needed
        .iter()
        .map(|entry| format!("{} {}", entry.missions, entry.duration))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn format_unlock(stats: &ShipProgressionStats) -> String {
    match stats.launches_to_unlock_next() {
        Some(0) => "unlocked".to_string(),
        Some(remaining) => format!("{remaining} launches"),
        None => "-".to_string(),
    }
}

fn format_counts(stats: &ShipProgressionStats) -> String {
    stats
        .counts()
        .iter()
        .map(|entry| format!("{}×{}", entry.count, entry.duration))
        .collect::<Vec<_>>()
        .join(", ")
}

fn window_label(report: &LaunchLogReport<'_>) -> String {
    report
        .window_days
        .map_or_else(|| "all days".to_string(), |n| format!("last {n} days"))
}

pub fn generate_console_report(
    out: &mut impl Write,
    report: &FleetReport<'_>,
    verbose: bool,
) -> Result<()> {
    if let Some(fleet) = report.progression {
        writeln!(out, "{}", "🚀 Fleet Progression".bright_cyan().bold())?;
        writeln!(out, "{}", "====================".cyan())?;
        if fleet.ships().is_empty() {
            writeln!(out, "No launched missions.")?;
        }
        for stats in fleet.ships() {
            let level = format!("level {}/{}", stats.level(), stats.max_level());
            let level = if stats.is_max_level() {
                level.green()
            } else {
                level.yellow()
            };
            writeln!(
                out,
                "{} {} ({} missions, {:.1} launch points)",
                stats.ship().to_string().bold(),
                level,
                stats.total_missions(),
                stats.launch_points()
            )?;
            writeln!(out, "   Missions: {}", format_counts(stats))?;
            writeln!(
                out,
                "   Next level: {} ({})",
                format_points(stats.launch_points_to_next_level()),
                format_needed(stats.missions_to_next_level())
            )?;
            writeln!(
                out,
                "   Max level: {} ({})",
                format_points(stats.launch_points_to_max_level()),
                format_needed(stats.missions_to_max_level())
            )?;
            writeln!(out, "   Next ship: {}", format_unlock(stats))?;
        }
        for change in fleet.level_changes() {
            writeln!(
                out,
                "{} {} is level {} in the save but level {} by launch count",
                "⚠️ ".yellow(),
                change.ship,
                change.recorded,
                change.resolved
            )?;
        }
        writeln!(out)?;
    }

    if let Some(log) = &report.launch_log {
        writeln!(
            out,
            "{} ({})",
            "📅 Launch Log".bright_yellow().bold(),
            window_label(log)
        )?;
        writeln!(out, "{}", "=============".yellow())?;
        if log.days.is_empty() {
            writeln!(out, "No launches in range.")?;
        }
        for day in log.days {
            let ships = day
                .ship_counts()
                .into_iter()
                .map(|(ship, count)| format!("{count}× {ship}"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                out,
                "{} {} launches: {}",
                day.day().to_string().bold(),
                day.missions().len(),
                ships
            )?;
            if verbose {
                for entry in day.missions() {
                    writeln!(
                        out,
                        "   {} {} {} [{}]",
                        entry.launched_at.format("%H:%M:%S"),
                        entry.mission.ship,
                        entry.mission.duration,
                        entry.mission.id
                    )?;
                }
            }
        }
    }
    Ok(())
}

pub fn generate_json_report(out: &mut impl Write, report: &FleetReport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut impl Write, report: &FleetReport<'_>) -> Result<()> {
    writeln!(out, "# Fleet Report\n")?;

    if let Some(fleet) = report.progression {
        writeln!(out, "## Progression\n")?;
        writeln!(
            out,
            "| Ship | Missions | Launch points | Level | To next | To max | Next ship |"
        )?;
        writeln!(out, "|---|---|---|---|---|---|---|")?;
        for stats in fleet.ships() {
            writeln!(
                out,
                "| {} | {} | {:.1} | {}/{} | {} | {} | {} |",
                stats.ship(),
                stats.total_missions(),
                stats.launch_points(),
                stats.level(),
                stats.max_level(),
                format_points(stats.launch_points_to_next_level()),
                format_points(stats.launch_points_to_max_level()),
                format_unlock(stats)
            )?;
        }
        writeln!(out)?;
    }

    if let Some(log) = &report.launch_log {
        writeln!(out, "## Launch Log ({})\n", window_label(log))?;
        if log.days.is_empty() {
            writeln!(out, "_No launches in range._")?;
        }
        for day in log.days {
            writeln!(out, "### {}\n", day.day())?;
            for entry in day.missions() {
                writeln!(
                    out,
                    "- {} {} ({}) `{}`",
                    entry.launched_at.format("%H:%M:%S"),
                    entry.mission.ship,
                    entry.mission.duration,
                    entry.mission.id
                )?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetlog_core::{ProgressionConfig, SaveSnapshot};

    const SNAPSHOT: &str = r#"{
        "artifacts": {
            "archive": [
                {"id": "a1", "ship": "CHICKEN_ONE", "duration": "SHORT", "status": "COMPLETE",
                 "start_time": 1700000000, "launched_at": 1700000000}
            ]
        }
    }"#;

    fn render(kind: &str) -> String {
        let snapshot = SaveSnapshot::from_json(SNAPSHOT).unwrap();
        let analysis = snapshot
            .analyze(ProgressionConfig::default(), DayBoundary::Utc)
            .unwrap();
        let report = FleetReport {
            progression: Some(&analysis.progression),
            launch_log: Some(LaunchLogReport {
                boundary: DayBoundary::Utc,
                today: NaiveDate::from_ymd_opt(2023, 11, 14).unwrap(),
                window_days: None,
                days: analysis.launch_log.days(),
            }),
        };
        let mut buffer = Vec::new();
        match kind {
            "json" => generate_json_report(&mut buffer, &report).unwrap(),
            "markdown" => generate_markdown_report(&mut buffer, &report).unwrap(),
            _ => generate_console_report(&mut buffer, &report, true).unwrap(),
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn console_lists_ships_and_days() {
        let text = render("console");
        assert!(text.contains("Chicken One"));
        assert!(text.contains("2023-11-14"));
        assert!(text.contains("[a1]"));
    }

    #[test]
    fn markdown_renders_progression_table() {
        let text = render("markdown");
        assert!(text.contains("| Chicken One | 1 | 1.0 | 0/3 | +4.0 | +23.0 | 3 launches |"));
        assert!(text.contains("### 2023-11-14"));
    }

    #[test]
    fn json_is_machine_readable() {
        let value: serde_json::Value = serde_json::from_str(&render("json")).unwrap();
        assert_eq!(value["launch_log"]["boundary"], "utc");
        assert_eq!(value["launch_log"]["days"][0]["day"], "2023-11-14");
        assert_eq!(value["progression"]["ships"][0]["ship"], "CHICKEN_ONE");
        assert_eq!(value["progression"]["resolved_levels"]["CHICKEN_ONE"], 0);
    }

    #[test]
    fn formatting_helpers_handle_capped_values() {
        assert_eq!(format_points(None), "maxed");
        assert_eq!(format_points(Some(2.24)), "+2.2");
        assert_eq!(format_needed(&[]), "-");
    }
}
