//! Status command: current punch status, running timer and today's punches.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use pc_core::{Status, format_elapsed, latest_status, local_midnight};
use pc_db::EventStore;

use super::util::{describe_location, local_time};
use crate::Config;

pub fn run<W, S, Tz>(
    writer: &mut W,
    store: &S,
    config: &Config,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()>
where
    W: Write,
    S: EventStore,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let all = store
        .list(config.list_limit)
        .context("could not load time log data")?;
    let status = latest_status(&all);

    let today_start = local_midnight(now.with_timezone(tz).date_naive(), tz);
    let mut today = store
        .list_since(today_start, config.list_limit)
        .context("could not load time log data")?;
    today.sort_by_key(|event| event.timestamp);

    writeln!(writer, "Status: {status}")?;
    let latest = all.iter().map(|event| event.timestamp).max();
    if let Some(latest) = latest.filter(|_| status != Status::ClockedOut) {
        writeln!(writer, "Elapsed: {}", format_elapsed(now - latest))?;
    }

    writeln!(writer)?;
    if today.is_empty() {
        writeln!(writer, "No punches today.")?;
        return Ok(());
    }

    writeln!(writer, "Today:")?;
    for event in &today {
        writeln!(
            writer,
            "  {}  {:<12} {}",
            local_time(event.timestamp, tz),
            event.status.as_str(),
            describe_location(&event.location)
        )?;
    }

    Ok(())
}
