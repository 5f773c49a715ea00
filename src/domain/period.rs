use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Recency windows selectable from the dashboard period picker.
///
/// Each value maps to a half-open interval `[window_start(now), now)`.
/// `now` is always an explicit parameter so period boundaries stay
/// deterministic under test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl PeriodFilter {
    /// Computes the inclusive lower bound of the window ending at `now`.
    ///
    /// Returns `None` for [`PeriodFilter::All`], which matches every record.
    pub fn window_start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            PeriodFilter::All => None,
            PeriodFilter::Today => Some(start_of_day(now)),
            PeriodFilter::Week => Some(now - Duration::days(7)),
            PeriodFilter::Month => Some(shift_months(now, -1)),
            PeriodFilter::Quarter => Some(shift_months(now, -3)),
            PeriodFilter::Year => Some(shift_months(now, -12)),
        }
    }

    /// True when `created_at` falls inside the window ending at `now`.
    pub fn contains(self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.window_start(now) {
            None => true,
            Some(start) => created_at >= start,
        }
    }
}

fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .unwrap_or(instant)
}

/// Shifts an instant by whole calendar months, clamping the day of month.
fn shift_months(instant: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let date = instant.date_naive();
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    let shifted = NaiveDate::from_ymd_opt(year, month as u32, day)
        .unwrap_or(date)
        .and_time(instant.time());
    Utc.from_utc_datetime(&shifted)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
