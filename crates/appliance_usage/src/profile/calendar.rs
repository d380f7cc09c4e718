use std::fmt;

use crate::error::Result;
use crate::error::UsageError;

/// Minute offset from the start of a period (or from the Epoch for a month).
pub type Minutes = i64;

/// The number of minutes in a period (one day).
pub const MAX_IN_PERIOD: Minutes = 1440;

/// A validated day of the uniform 365-day calendar.
///
/// Day 1 begins at the Epoch (timestamp 0) and every day spans exactly
/// [`MAX_IN_PERIOD`] minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u16);

impl Day {
    pub const FIRST: u16 = 1;
    pub const LAST: u16 = 365;

    pub fn new(day: i64) -> Result<Self> {
        u16::try_from(day)
            .ok()
            .filter(|d| (Self::FIRST..=Self::LAST).contains(d))
            .map(Day)
            .ok_or_else(|| UsageError::DayOutOfRange(day.to_string()))
    }

    pub fn number(self) -> u16 {
        self.0
    }

    /// First minute of this day, measured from the Epoch.
    pub fn start(self) -> Minutes {
        (Minutes::from(self.0) - 1) * MAX_IN_PERIOD
    }

    /// First minute after this day.
    pub fn end(self) -> Minutes {
        self.start() + MAX_IN_PERIOD
    }

    /// Every day of the calendar, in order.
    pub fn all() -> impl Iterator<Item = Day> {
        (Self::FIRST..=Self::LAST).map(Day)
    }
}

impl TryFrom<i64> for Day {
    type Error = UsageError;

    fn try_from(day: i64) -> Result<Self> {
        Day::new(day)
    }
}

impl TryFrom<f64> for Day {
    type Error = UsageError;

    /// Accepts whole numbers only; the integer check runs before the range
    /// check so `0.5` is reported as not an integer.
    fn try_from(day: f64) -> Result<Self> {
        if !day.is_finite() || day.fract() != 0.0 {
            return Err(UsageError::NotAnInteger(day));
        }
        if day < f64::from(Self::FIRST) || day > f64::from(Self::LAST) {
            return Err(UsageError::DayOutOfRange(day.to_string()));
        }
        Day::new(day as i64)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
