//! Weekly and monthly chart series built from sessions.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::format::format_hours;
use crate::session::Session;

/// Which weekday a calendar week starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }

    /// First day of the week containing `date`.
    #[must_use]
    pub fn week_of(self, date: NaiveDate) -> NaiveDate {
        let offset = match self {
            Self::Sunday => date.weekday().num_days_from_sunday(),
            Self::Monday => date.weekday().num_days_from_monday(),
        };
        date - Duration::days(i64::from(offset))
    }
}

/// One bar in a chart: a day or a week with its summed hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBucket {
    pub label: String,
    /// The day itself, or the first day of the week.
    pub start: NaiveDate,
    pub worked_hours: f64,
    pub overtime_hours: f64,
}

/// Per-day hours for the week containing the most recent session.
///
/// Every day of that week gets a bucket, in calendar order, with zeros for
/// days without a session.
pub fn weekly_chart_data(sessions: &[Session], week_start: WeekStart) -> Vec<ChartBucket> {
    let Some(latest) = sessions.iter().map(|s| s.date).max() else {
        return Vec::new();
    };
    let first_day = week_start.week_of(latest);

    first_day
        .iter_days()
        .take(7)
        .map(|day| {
            let session = sessions.iter().find(|s| s.date == day);
            ChartBucket {
                label: day.format("%a").to_string(),
                start: day,
                worked_hours: session.map_or(0.0, |s| format_hours(s.work_duration)),
                overtime_hours: session.map_or(0.0, |s| format_hours(s.overtime)),
            }
        })
        .collect()
}

/// Per-week hours for the month containing the most recent session.
///
/// Only sessions inside that month count. Weeks appear oldest first.
pub fn monthly_chart_data(sessions: &[Session], week_start: WeekStart) -> Vec<ChartBucket> {
    let Some(latest) = sessions.iter().map(|s| s.date).max() else {
        return Vec::new();
    };

    let mut newest_first: Vec<&Session> = sessions.iter().collect();
    newest_first.sort_by_key(|s| std::cmp::Reverse(s.date));

    // (week start, worked, overtime) in the order weeks are first met
    let mut weeks: Vec<(NaiveDate, Duration, Duration)> = Vec::new();
    for session in newest_first {
        if session.date.year() != latest.year() || session.date.month() != latest.month() {
            continue;
        }
        let week = week_start.week_of(session.date);
        match weeks.iter_mut().find(|(start, _, _)| *start == week) {
            Some((_, worked, overtime)) => {
                *worked += session.work_duration;
                *overtime += session.overtime;
            }
            None => weeks.push((week, session.work_duration, session.overtime)),
        }
    }

    weeks
        .into_iter()
        .rev()
        .map(|(start, worked, overtime)| ChartBucket {
            label: format!("Week of {}", start.format("%d/%m")),
            start,
            worked_hours: format_hours(worked),
            overtime_hours: format_hours(overtime),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn session(date: NaiveDate, work_minutes: i64) -> Session {
        let work_duration = Duration::minutes(work_minutes);
        Session {
            date,
            events: Vec::new(),
            work_duration,
            break_duration: Duration::zero(),
            overtime: (work_duration - Duration::hours(8)).max(Duration::zero()),
        }
    }

    #[test]
    fn empty_sessions_give_empty_series() {
        assert!(weekly_chart_data(&[], WeekStart::Sunday).is_empty());
        assert!(monthly_chart_data(&[], WeekStart::Sunday).is_empty());
    }

    #[test]
    fn week_of_respects_start_day() {
        // Wed 12 Mar 2025
        let wednesday = date(3, 12);
        assert_eq!(WeekStart::Sunday.week_of(wednesday), date(3, 9));
        assert_eq!(WeekStart::Monday.week_of(wednesday), date(3, 10));
        assert_eq!(WeekStart::Monday.week_of(date(3, 9)), date(3, 3));
        assert_eq!(WeekStart::Sunday.week_of(date(3, 9)), date(3, 9));
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact values are representable in binary"
    )]
    fn weekly_fills_every_day_of_the_latest_week() {
        let sessions = vec![
            session(date(3, 12), 600),
            session(date(3, 10), 450),
            session(date(3, 4), 480),
        ];
        let buckets = weekly_chart_data(&sessions, WeekStart::Sunday);

        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
        assert_eq!(buckets[0].start, date(3, 9));

        let worked: Vec<_> = buckets.iter().map(|b| b.worked_hours).collect();
        assert_eq!(worked, vec![0.0, 7.5, 0.0, 10.0, 0.0, 0.0, 0.0]);
        assert_eq!(buckets[3].overtime_hours, 2.0);
    }

    #[test]
    fn weekly_with_monday_start() {
        let sessions = vec![session(date(3, 9), 60)];
        let buckets = weekly_chart_data(&sessions, WeekStart::Monday);
        assert_eq!(buckets.first().unwrap().start, date(3, 3));
        assert_eq!(buckets.last().unwrap().label, "Sun");
        assert!((buckets[6].worked_hours - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weekly_hours_sum_to_total_work() {
        let sessions = vec![
            session(date(3, 14), 517),
            session(date(3, 11), 301),
            session(date(3, 10), 488),
        ];
        let buckets = weekly_chart_data(&sessions, WeekStart::Sunday);
        let bucket_total: f64 = buckets.iter().map(|b| b.worked_hours).sum();
        let work_total = sessions
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.work_duration);
        assert!((bucket_total - format_hours(work_total)).abs() < 1e-9);
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact values are representable in binary"
    )]
    fn monthly_groups_by_week_oldest_first() {
        let sessions = vec![
            session(date(3, 18), 540),
            session(date(3, 17), 480),
            session(date(3, 12), 300),
            session(date(3, 3), 120),
            session(date(2, 27), 480),
        ];
        let buckets = monthly_chart_data(&sessions, WeekStart::Sunday);

        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Week of 02/03", "Week of 09/03", "Week of 16/03"]
        );
        assert_eq!(buckets[0].worked_hours, 2.0);
        assert_eq!(buckets[1].worked_hours, 5.0);
        assert_eq!(buckets[2].worked_hours, 17.0);
        assert_eq!(buckets[2].overtime_hours, 1.0);
    }

    #[test]
    fn monthly_week_may_start_in_previous_month() {
        // Sat 1 Mar 2025 belongs to the week starting Sun 23 Feb
        let sessions = vec![session(date(3, 1), 60), session(date(2, 28), 60)];
        let buckets = monthly_chart_data(&sessions, WeekStart::Sunday);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].start, date(2, 23));
        assert!((buckets[0].worked_hours - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rollups_do_not_depend_on_input_order() {
        let mut sessions = vec![
            session(date(3, 4), 480),
            session(date(3, 12), 600),
            session(date(3, 10), 450),
        ];
        let weekly = weekly_chart_data(&sessions, WeekStart::Sunday);
        let monthly = monthly_chart_data(&sessions, WeekStart::Sunday);
        sessions.reverse();
        assert_eq!(weekly_chart_data(&sessions, WeekStart::Sunday), weekly);
        assert_eq!(monthly_chart_data(&sessions, WeekStart::Sunday), monthly);
    }
}
