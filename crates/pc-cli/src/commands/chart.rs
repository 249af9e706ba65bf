//! Chart command: weekly or monthly hours as text bars.

use std::fmt::Write;

use anyhow::{Context, Result};
use pc_core::{ChartBucket, monthly_chart_data, reconstruct_sessions_local, weekly_chart_data};
use pc_db::EventStore;

use crate::Config;

/// Which rollup to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Week,
    Month,
}

// ========== Progress Bar ==========

/// Generates a 10-character bar for `value` relative to `max`.
/// Values under 5% of max still get a single block so they stay visible.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 && value > 0.0 {
        1
    } else {
        (ratio * 10.0).round().clamp(0.0, 10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Formats buckets as one line each: label, hours, bar and any overtime.
pub fn format_chart(span: Span, buckets: &[ChartBucket]) -> String {
    let mut output = String::new();

    let title = match span {
        Span::Week => "HOURS THIS WEEK",
        Span::Month => "HOURS THIS MONTH",
    };
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", "─".repeat(title.chars().count())).unwrap();

    if buckets.is_empty() {
        writeln!(output, "No sessions to chart.").unwrap();
        return output;
    }

    let max = buckets
        .iter()
        .map(|b| b.worked_hours)
        .fold(0.0_f64, f64::max);

    for bucket in buckets {
        let label = match span {
            Span::Week => format!("{} {}", bucket.label, bucket.start.format("%d/%m")),
            Span::Month => bucket.label.clone(),
        };
        let bar = progress_bar(bucket.worked_hours, max);
        write!(output, "{label:<16} {:>6.2}h  {bar}", bucket.worked_hours).unwrap();
        if bucket.overtime_hours > 0.0 {
            write!(output, "  +{:.2}h overtime", bucket.overtime_hours).unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}

/// Runs the chart command.
pub fn run<S: EventStore>(store: &S, config: &Config, span: Span, json: bool) -> Result<()> {
    let events = store
        .list(config.list_limit)
        .context("could not load time log data")?;
    let sessions = reconstruct_sessions_local(&events, &config.session_policy());
    let buckets = match span {
        Span::Week => weekly_chart_data(&sessions, config.week_start),
        Span::Month => monthly_chart_data(&sessions, config.week_start),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
    } else {
        print!("{}", format_chart(span, &buckets));
    }

    Ok(())
}
