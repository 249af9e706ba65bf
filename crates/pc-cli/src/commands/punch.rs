//! Punch commands: in, out, break and lunch.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use pc_core::{Event, Location, NewEvent, Status, latest_status};
use pc_db::EventStore;

use super::util::{describe_location, parse_datetime};
use crate::Config;
use crate::cli::PunchArgs;

/// Records one punch, refusing transitions the current status does not allow
/// unless `--force` is given.
pub fn run<W, S, Tz>(
    writer: &mut W,
    store: &mut S,
    config: &Config,
    status: Status,
    args: &PunchArgs,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<Event>
where
    W: Write,
    S: EventStore,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let timestamp = match args.at.as_deref() {
        Some(at) => parse_datetime(at, now)?,
        None => now,
    };
    let location = location_from_args(args)?;
    let subject = config.subject_id().context("invalid subject in configuration")?;

    let existing = store
        .list(config.list_limit)
        .context("could not load time log data")?;
    let current = latest_status(&existing);
    if !current.can_transition_to(status) {
        if !args.force {
            let allowed: Vec<_> = current.allowed_next().iter().map(Status::as_str).collect();
            anyhow::bail!(
                "cannot go {status} while {current} (allowed: {}); use --force to record anyway",
                allowed.join(", ")
            );
        }
        tracing::warn!(%current, %status, "forcing punch outside allowed transitions");
    }

    let event = store
        .create(NewEvent {
            subject,
            status,
            timestamp,
            location,
        })
        .context("failed to record punch")?;

    writeln!(
        writer,
        "{} at {} ({})",
        punch_verb(status),
        event
            .timestamp
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S"),
        describe_location(&event.location)
    )?;
    Ok(event)
}

fn location_from_args(args: &PunchArgs) -> Result<Location> {
    match (args.lat, args.lon, args.accuracy) {
        (Some(lat), Some(lon), Some(accuracy)) => {
            Location::new(lat, lon, accuracy).context("invalid location reading")
        }
        (None, None, None) => Ok(Location::UNAVAILABLE),
        _ => anyhow::bail!("--lat, --lon and --accuracy must be given together"),
    }
}

const fn punch_verb(status: Status) -> &'static str {
    match status {
        Status::ClockedIn => "Clocked in",
        Status::ClockedOut => "Clocked out",
        Status::OnBreak => "Break started",
        Status::OnLunch => "Lunch started",
    }
}
