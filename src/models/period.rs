//! Budget period types and resolved period windows
//!
//! A budget declares a `PeriodType`; the period resolver turns that into a
//! concrete half-open `PeriodWindow` for a given instant.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a budget resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Monday through Sunday
    Weekly,
    /// Calendar month (default)
    #[default]
    Monthly,
    /// Recurring cycle defined by the budget's custom start/end dates
    Custom,
}

impl PeriodType {
    /// Parse a period type from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Some(Self::Weekly),
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "custom" | "c" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

/// A resolved accounting window: `start` inclusive, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PeriodWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Window spanning whole days, from midnight of `start` to midnight of `end`
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        }
    }

    /// Check if an instant falls within this window
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Check if a calendar date (taken at 00:00) falls within this window
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length of the window in whole days
    pub fn days(&self) -> i64 {
        self.duration().num_days()
    }

    /// The last calendar day covered by the window
    pub fn last_day(&self) -> NaiveDate {
        (self.end - Duration::nanoseconds(1)).date()
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.date().format("%Y-%m-%d"),
            self.last_day().format("%Y-%m-%d")
        )
    }
}
