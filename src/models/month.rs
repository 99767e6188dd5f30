//! Month keys and calendar facts
//!
//! A [`MonthKey`] is the year-month truncation of a date and is the unit that
//! transactions and summaries are grouped by. [`MonthCalendar`] carries the
//! day counts the forecast needs for one month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, rendered and parsed as `YYYY-MM`
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(MonthParseError::OutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// Truncate a date to its month
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing the local date at call time
    ///
    /// Only the command-line shell should call this; the core takes the
    /// reference month as a parameter.
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Validated in the constructors
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month (28-31)
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month()).unwrap_or_default()
    }

    /// The given day, or the last day when the month is shorter
    pub fn day_or_last(&self, day: Option<u32>) -> NaiveDate {
        match day.filter(|d| (1..=self.days_in_month()).contains(d)) {
            Some(day) => NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_default(),
            None => self.last_day(),
        }
    }

    /// The month `months` later; `None` past the supported date range
    pub fn add_months(&self, months: u32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::new(year, month).ok()
    }

    /// Whole months from `earlier` to `self`; negative when `earlier` is later
    pub fn months_since(&self, earlier: MonthKey) -> i64 {
        (i64::from(self.year) - i64::from(earlier.year)) * 12 + i64::from(self.month)
            - i64::from(earlier.month)
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthParseError {
    #[error("Invalid month format: '{0}' (expected YYYY-MM)")]
    InvalidFormat(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
    #[error("Year out of range: {0}")]
    OutOfRange(i32),
}

/// Calendar facts for one month, as seen from a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    /// Number of days in the month
    pub days_in_month: u32,
    /// Days elapsed so far (1-based day of month; 0 before the month starts)
    pub day_of_month: u32,
    /// Whether the month is the one containing the reference date
    pub is_current_month: bool,
}

impl MonthCalendar {
    pub fn new(days_in_month: u32, day_of_month: u32, is_current_month: bool) -> Self {
        Self {
            days_in_month,
            day_of_month,
            is_current_month,
        }
    }

    /// Derive the calendar facts for `month` relative to `today`
    ///
    /// A past month counts as fully elapsed and a future month as not started.
    pub fn for_month(month: MonthKey, today: NaiveDate) -> Self {
        let days_in_month = month.days_in_month();
        let current = MonthKey::from_date(today);

        let (day_of_month, is_current_month) = match month.cmp(&current) {
            std::cmp::Ordering::Equal => (today.day(), true),
            std::cmp::Ordering::Less => (days_in_month, false),
            std::cmp::Ordering::Greater => (0, false),
        };

        Self {
            days_in_month,
            day_of_month,
            is_current_month,
        }
    }

    /// Days left after today, never negative
    pub fn remaining_days(&self) -> u32 {
        self.days_in_month.saturating_sub(self.day_of_month)
    }
}
