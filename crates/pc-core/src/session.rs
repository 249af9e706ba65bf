//! Reconstructing per-day work sessions from punch events.
//!
//! Events arrive in no particular order. They are bucketed by local calendar
//! day, sorted, and walked with two open-interval slots: one for work and one
//! for a break or lunch. Only closed intervals count toward the totals unless
//! a [`SessionPolicy`] says otherwise.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::event::Event;
use crate::status::Status;

/// Length of a standard workday; work beyond this is overtime.
pub const STANDARD_WORKDAY: Duration = Duration::hours(8);

/// What to do with a break still open when the worker clocks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenBreakPolicy {
    /// Drop the break; its span counts as neither work nor break.
    #[default]
    Discard,
    /// Count the span up to the clock-out as break time.
    CountAsBreak,
}

/// What to do with an interval still open after the day's last event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingIntervalPolicy {
    /// Open intervals contribute nothing until they are closed.
    #[default]
    Discard,
    /// Close open intervals at local midnight ending the day.
    CloseAtEndOfDay,
}

/// Tunable points of the reconstruction.
///
/// The default reproduces the plain behaviour: an 8 hour workday, open breaks
/// dropped at clock-out, trailing open intervals dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub standard_workday: Duration,
    pub open_break_at_clock_out: OpenBreakPolicy,
    pub trailing_interval: TrailingIntervalPolicy,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            standard_workday: STANDARD_WORKDAY,
            open_break_at_clock_out: OpenBreakPolicy::default(),
            trailing_interval: TrailingIntervalPolicy::default(),
        }
    }
}

/// One calendar day of work, derived from that day's events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Local calendar day of the earliest event.
    pub date: NaiveDate,
    /// The day's events in chronological order.
    pub events: Vec<Event>,
    #[serde(rename = "work_ms", serialize_with = "serialize_millis")]
    pub work_duration: Duration,
    #[serde(rename = "break_ms", serialize_with = "serialize_millis")]
    pub break_duration: Duration,
    #[serde(rename = "overtime_ms", serialize_with = "serialize_millis")]
    pub overtime: Duration,
}

pub(crate) fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_milliseconds())
}

/// Reconstructs sessions using the system's local time zone for day boundaries.
pub fn reconstruct_sessions_local(events: &[Event], policy: &SessionPolicy) -> Vec<Session> {
    reconstruct_sessions(events, &Local, policy)
}

/// Reconstructs one session per local calendar day, most recent day first.
///
/// Total over any list of events: an empty list yields no sessions, and
/// unmatched punches are handled by the policy rather than rejected.
pub fn reconstruct_sessions<Tz: TimeZone>(
    events: &[Event],
    tz: &Tz,
    policy: &SessionPolicy,
) -> Vec<Session> {
    let mut by_day: HashMap<NaiveDate, Vec<Event>> = HashMap::new();
    for event in events {
        let day = event.timestamp.with_timezone(tz).date_naive();
        by_day.entry(day).or_default().push(event.clone());
    }

    let mut sessions: Vec<Session> = by_day
        .into_iter()
        .map(|(date, mut day_events)| {
            day_events.sort_by_key(|event| event.timestamp);
            let day_end = date.succ_opt().map(|next| local_midnight(next, tz));
            let (work_duration, break_duration) = tally_day(&day_events, day_end, policy);
            let overtime = (work_duration - policy.standard_workday).max(Duration::zero());
            Session {
                date,
                events: day_events,
                work_duration,
                break_duration,
                overtime,
            }
        })
        .collect();

    sessions.sort_by_key(|session| Reverse(session.date));
    tracing::debug!(
        events = events.len(),
        sessions = sessions.len(),
        "reconstructed sessions"
    );
    sessions
}

/// Walks one day's sorted events and returns (work, break) totals.
fn tally_day(
    events: &[Event],
    day_end: Option<DateTime<Utc>>,
    policy: &SessionPolicy,
) -> (Duration, Duration) {
    let mut work = Duration::zero();
    let mut pause = Duration::zero();
    let mut open_work_start: Option<DateTime<Utc>> = None;
    let mut open_break_start: Option<DateTime<Utc>> = None;

    for event in events {
        let now = event.timestamp;
        match event.status {
            Status::ClockedIn => {
                if let Some(start) = open_break_start.take() {
                    pause += now - start;
                }
                open_work_start = Some(now);
            }
            Status::OnBreak | Status::OnLunch => {
                if let Some(start) = open_work_start.take() {
                    work += now - start;
                }
                open_break_start = Some(now);
            }
            Status::ClockedOut => {
                if let Some(start) = open_work_start.take() {
                    work += now - start;
                }
                if let (OpenBreakPolicy::CountAsBreak, Some(start)) =
                    (policy.open_break_at_clock_out, open_break_start.take())
                {
                    pause += now - start;
                }
            }
        }
    }

    if let (TrailingIntervalPolicy::CloseAtEndOfDay, Some(end)) =
        (policy.trailing_interval, day_end)
    {
        if let Some(start) = open_work_start {
            work += end - start;
        }
        if let Some(start) = open_break_start {
            pause += end - start;
        }
    }

    (work, pause)
}

/// Converts local midnight of `date` in `tz` to UTC.
///
/// Ambiguous midnights (DST fall-back) resolve to the earlier instant. When
/// midnight falls in a DST gap, 1am is used instead.
pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            let one_am = midnight + Duration::hours(1);
            tz.from_local_datetime(&one_am)
                .earliest()
                .map_or_else(|| Utc.from_utc_datetime(&midnight), |dt| dt.with_timezone(&Utc))
        }
    }
}
