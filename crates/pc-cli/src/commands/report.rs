//! Report command for per-day work sessions.
//!
//! This module implements `pc report`, in human-readable or JSON form.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use pc_core::{
    ReportSummary, Session, SessionPolicy, format_duration, reconstruct_sessions, summarize,
};
use pc_db::EventStore;
use serde::Serialize;

use super::util::{describe_location, local_time};
use crate::Config;

/// Computed report data.
#[derive(Debug, Serialize)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub subject: String,
    pub timezone: String,
    pub summary: ReportSummary,
    pub sessions: Vec<Session>,
}

// ========== Report Generation ==========

/// Loads all events and reconstructs the report in `tz`.
pub fn generate_report_data<S, Tz>(
    store: &S,
    config: &Config,
    policy: &SessionPolicy,
    generated_at: DateTime<Utc>,
    tz: &Tz,
    timezone: String,
) -> Result<ReportData>
where
    S: EventStore,
    Tz: TimeZone,
{
    let events = store
        .list(config.list_limit)
        .context("could not load time log data")?;
    let sessions = reconstruct_sessions(&events, tz, policy);
    let summary = summarize(&sessions);

    Ok(ReportData {
        generated_at,
        subject: config.subject.clone(),
        timezone,
        summary,
        sessions,
    })
}

/// Formats the human-readable report output.
pub fn format_report<Tz>(data: &ReportData, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut output = String::new();

    writeln!(output, "TIME REPORT: {}", data.subject).unwrap();

    if data.sessions.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No punches recorded.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'pc in' to clock in.").unwrap();
        return output;
    }

    // SUMMARY section
    let summary = &data.summary;
    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(
        output,
        "Total worked:   {}",
        format_duration(summary.total_work, false)
    )
    .unwrap();
    writeln!(
        output,
        "Total overtime: {}",
        format_duration(summary.total_overtime, false)
    )
    .unwrap();
    writeln!(
        output,
        "Total breaks:   {}",
        format_duration(summary.total_break, false)
    )
    .unwrap();
    writeln!(output, "Days worked:    {}", summary.days_worked).unwrap();

    // BY DAY section
    writeln!(output).unwrap();
    writeln!(output, "BY DAY").unwrap();
    writeln!(output, "──────").unwrap();
    for session in &data.sessions {
        writeln!(
            output,
            "{}  worked {}  overtime {}  breaks {}",
            session.date.format("%a, %b %-d %Y"),
            format_duration(session.work_duration, true),
            format_duration(session.overtime, true),
            format_duration(session.break_duration, true)
        )
        .unwrap();
        for event in &session.events {
            writeln!(
                output,
                "  {}  {:<12} {}",
                local_time(event.timestamp, tz),
                event.status.as_str(),
                describe_location(&event.location)
            )
            .unwrap();
        }
    }

    output
}

/// Runs the report command.
pub fn run<S: EventStore>(store: &S, config: &Config, json: bool) -> Result<()> {
    let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
    let data = generate_report_data(
        store,
        config,
        &config.session_policy(),
        Utc::now(),
        &Local,
        timezone,
    )?;

    if json {
        let output = serde_json::to_string_pretty(&data)?;
        println!("{output}");
    } else {
        let output = format_report(&data, &Local);
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pc_core::{Location, NewEvent, Status, SubjectId};
    use pc_db::Database;

    fn config() -> Config {
        Config {
            subject: "worker".to_string(),
            ..Config::default()
        }
    }

    fn seeded_db(punches: &[(Status, DateTime<Utc>)]) -> Database {
        let mut db = Database::open_in_memory().unwrap();
        for &(status, timestamp) in punches {
            db.create(NewEvent {
                subject: SubjectId::new("worker").unwrap(),
                status,
                timestamp,
                location: Location::UNAVAILABLE,
            })
            .unwrap();
        }
        db
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
    }

    fn report(db: &Database) -> ReportData {
        generate_report_data(
            db,
            &config(),
            &SessionPolicy::default(),
            at(20, 0, 0),
            &Utc,
            "UTC".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn empty_report_has_hint() {
        let db = seeded_db(&[]);
        assert_snapshot!(format_report(&report(&db), &Utc), @r"
        TIME REPORT: worker

        No punches recorded.

        Hint: Run 'pc in' to clock in.
        ");
    }

    #[test]
    fn report_lists_days_newest_first() {
        let db = seeded_db(&[
            (Status::ClockedOut, at(10, 17, 0)),
            (Status::ClockedIn, at(10, 9, 0)),
            (Status::OnBreak, at(10, 12, 0)),
            (Status::ClockedIn, at(10, 13, 0)),
            (Status::ClockedIn, at(11, 8, 0)),
            (Status::ClockedOut, at(11, 18, 30)),
        ]);
        let data = report(&db);

        assert_eq!(data.summary.days_worked, 2);
        assert_snapshot!(format_report(&data, &Utc), @r"
        TIME REPORT: worker

        SUMMARY
        ───────
        Total worked:   17h 30m
        Total overtime: 2h 30m
        Total breaks:   1h 00m
        Days worked:    2

        BY DAY
        ──────
        Tue, Mar 11 2025  worked 10h 30m  overtime 2h 30m  breaks 0m
          08:00:00  clocked-in   location unavailable
          18:30:00  clocked-out  location unavailable
        Mon, Mar 10 2025  worked 7h  overtime 0m  breaks 1h
          09:00:00  clocked-in   location unavailable
          12:00:00  on-break     location unavailable
          13:00:00  clocked-in   location unavailable
          17:00:00  clocked-out  location unavailable
        ");
    }

    #[test]
    fn report_json_uses_milliseconds() {
        let db = seeded_db(&[
            (Status::ClockedIn, at(10, 9, 0)),
            (Status::ClockedOut, at(10, 19, 0)),
        ]);
        let json = serde_json::to_value(report(&db)).unwrap();

        assert_eq!(json["subject"], "worker");
        assert_eq!(json["summary"]["total_overtime_ms"], 2 * 3_600_000);
        assert_eq!(json["sessions"][0]["date"], "2025-03-10");
        assert_eq!(json["sessions"][0]["work_ms"], 10 * 3_600_000);
        assert_eq!(json["sessions"][0]["events"][0]["status"], "clocked-in");
    }
}
