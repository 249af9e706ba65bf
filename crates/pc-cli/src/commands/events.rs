//! Events command for dumping the raw punch log.
//!
//! This module outputs stored events as JSONL, oldest first, for debugging.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use pc_core::events_since;
use pc_db::EventStore;

use super::util::parse_datetime;
use crate::Config;

/// Runs the events command, writing one JSON object per line.
pub fn run<W: Write, S: EventStore>(
    writer: &mut W,
    store: &S,
    config: &Config,
    limit: Option<usize>,
    since: Option<&str>,
    now: DateTime<Utc>,
) -> Result<usize> {
    let mut events = store
        .list(limit.unwrap_or(config.list_limit))
        .context("could not load time log data")?;
    if let Some(since) = since {
        let start = parse_datetime(since, now).context("invalid --since")?;
        events = events_since(&events, start);
    }
    events.sort_by_key(|event| event.timestamp);

    for event in &events {
        let json = serde_json::to_string(event)?;
        writeln!(writer, "{json}")?;
    }

    tracing::debug!(count = events.len(), "events written");
    Ok(events.len())
}
