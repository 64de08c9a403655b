//! UTC reporting windows.
//!
//! Every boundary is computed from UTC calendar days so the same request yields the same
//! window regardless of the host timezone.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Range keywords accepted from callers. Anything unrecognized reports the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangeKeyword {
    #[default]
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "90d")]
    Trailing90,
    #[serde(rename = "180d")]
    Trailing180,
    #[serde(rename = "1y")]
    TrailingYear,
}

impl RangeKeyword {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("90d") => Self::Trailing90,
            Some("180d") => Self::Trailing180,
            Some("1y") => Self::TrailingYear,
            _ => Self::Month,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Trailing90 => "90d",
            Self::Trailing180 => "180d",
            Self::TrailingYear => "1y",
        }
    }

    const fn days_back(self) -> Option<i64> {
        match self {
            Self::Month => None,
            Self::Trailing90 => Some(90),
            Self::Trailing180 => Some(180),
            Self::TrailingYear => Some(365),
        }
    }

    pub fn window(self, now: DateTime<Utc>) -> Window {
        match self.days_back() {
            None => Window::month_containing(now.date_naive()),
            Some(days_back) => Window::trailing_days(days_back, now),
        }
    }
}

/// Either a preset keyword or an explicit inclusive day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelection {
    Preset(RangeKeyword),
    Custom(Window),
}

impl RangeSelection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Preset(keyword) => keyword.as_str(),
            Self::Custom(_) => "custom",
        }
    }

    pub fn window(&self, now: DateTime<Utc>) -> Window {
        match self {
            Self::Preset(keyword) => keyword.window(now),
            Self::Custom(window) => *window,
        }
    }
}

impl From<RangeKeyword> for RangeSelection {
    fn from(value: RangeKeyword) -> Self {
        Self::Preset(value)
    }
}

/// Inclusive `[start, end]` instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// Whole UTC days from `first` through `last`; `None` when `last` precedes `first`.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        if last < first {
            return None;
        }

        Some(Self {
            start: start_of_day(first),
            end: end_of_day(last),
        })
    }

    pub fn calendar_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::month_containing)
    }

    pub fn month_containing(date: NaiveDate) -> Self {
        let first = first_of_month(date);
        let next = first_of_month(first + Duration::days(31));

        Self {
            start: start_of_day(first),
            end: start_of_day(next) - Duration::milliseconds(1),
        }
    }

    /// `days_back` calendar days ending with the UTC day of `now`.
    pub fn trailing_days(days_back: i64, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let first = today - Duration::days(days_back.max(1) - 1);

        Self {
            start: start_of_day(first),
            end: end_of_day(today),
        }
    }

    /// The calendar month immediately before this window's starting month.
    pub fn previous_month(&self) -> Self {
        let first = first_of_month(self.start.date_naive());
        Self::month_containing(first - Duration::days(1))
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn days_in_period(&self) -> i64 {
        let span = (self.end.date_naive() - self.start.date_naive()).num_days() + 1;
        span.max(0)
    }
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Accepts RFC 3339 instants or bare `YYYY-MM-DD` dates (read as UTC midnight).
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}
