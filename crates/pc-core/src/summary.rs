//! Totals across a list of sessions.

use chrono::Duration;
use serde::Serialize;

use crate::session::{Session, serialize_millis};

/// Aggregate figures for a report header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    #[serde(rename = "total_work_ms", serialize_with = "serialize_millis")]
    pub total_work: Duration,
    #[serde(rename = "total_break_ms", serialize_with = "serialize_millis")]
    pub total_break: Duration,
    #[serde(rename = "total_overtime_ms", serialize_with = "serialize_millis")]
    pub total_overtime: Duration,
    pub days_worked: usize,
}

/// Sums work, break and overtime. Every session counts as a day worked.
pub fn summarize(sessions: &[Session]) -> ReportSummary {
    sessions.iter().fold(
        ReportSummary {
            total_work: Duration::zero(),
            total_break: Duration::zero(),
            total_overtime: Duration::zero(),
            days_worked: 0,
        },
        |acc, session| ReportSummary {
            total_work: acc.total_work + session.work_duration,
            total_break: acc.total_break + session.break_duration,
            total_overtime: acc.total_overtime + session.overtime,
            days_worked: acc.days_worked + 1,
        },
    )
}
