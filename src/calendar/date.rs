use chrono::{Datelike, NaiveDate};

use crate::foundation::error::{YearGridError, YearGridResult};

/// A civil calendar date with no time-of-day and no timezone attached.
///
/// All downstream arithmetic is calendar-only; timezone handling ends in
/// [`crate::calendar::resolve`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> YearGridResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                YearGridError::validation(format!(
                    "invalid calendar date {year:04}-{month:02}-{day:02}"
                ))
            })
    }

    /// Parse a literal `YYYY-MM-DD` string as calendar components.
    pub fn parse(s: &str) -> YearGridResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| YearGridError::validation(format!("invalid date '{s}': {e}")))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// 1-based ordinal within the year (1..=365, or 1..=366 in leap years).
    pub fn day_of_year(self) -> u32 {
        let jan1 = NaiveDate::from_yo_opt(self.year(), 1).unwrap_or(self.0);
        (self.0 - jan1).num_days() as u32 + 1
    }

    pub fn days_in_year(self) -> u32 {
        days_in_year(self.year())
    }

    /// Whole days from this date until Dec 31 of the same year, not counting today.
    pub fn days_left(self) -> u32 {
        let dec31 = NaiveDate::from_ymd_opt(self.year(), 12, 31).unwrap_or(self.0);
        (dec31 - self.0).num_days() as u32
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = YearGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/date.rs"]
mod tests;
