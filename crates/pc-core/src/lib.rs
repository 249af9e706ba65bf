//! Core domain logic for punchclock.
//!
//! This crate contains the fundamental types and logic for:
//! - Punch events: status changes with an optional location reading
//! - Session reconstruction: turning unordered events into per-day work,
//!   break and overtime totals
//! - Rollups: weekly and monthly chart series and report totals
//!
//! Nothing here performs I/O. Callers fetch events from a store and pass a
//! snapshot in.

pub mod event;
pub mod format;
pub mod rollup;
pub mod session;
pub mod status;
pub mod summary;
pub mod types;

pub use event::{Event, Location, NewEvent, events_since, latest_status};
pub use format::{format_duration, format_elapsed, format_hours};
pub use rollup::{ChartBucket, WeekStart, monthly_chart_data, weekly_chart_data};
pub use session::{
    OpenBreakPolicy, STANDARD_WORKDAY, Session, SessionPolicy, TrailingIntervalPolicy,
    local_midnight, reconstruct_sessions, reconstruct_sessions_local,
};
pub use status::Status;
pub use summary::{ReportSummary, summarize};
pub use types::{EventId, SubjectId, ValidationError};
