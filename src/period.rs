//! Calendar periods used to bucket transactions and budgets.

use std::fmt::Display;

use serde::Serialize;
use time::Date;

use crate::Error;

/// Full month names, indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How many months the month selector offers, counting the current month.
pub const SELECTABLE_MONTHS: usize = 12;

/// A calendar month in a given year.
///
/// Months are zero-based (0 = January, 11 = December), matching the wire
/// format of budgets. Periods order chronologically: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Create a period from a year and a zero-based month.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is not in `0..=11`.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        if month > 11 {
            return Err(Error::InvalidMonth(month));
        }

        Ok(Self { year, month })
    }

    /// The period that contains `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()) - 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The zero-based month.
    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    /// A label such as "Jan 2024", used on chart axes.
    pub fn short_label(&self) -> String {
        format!("{} {}", &self.month_name()[..3], self.year)
    }

    /// Whether `date` falls within this period.
    pub fn contains(&self, date: Date) -> bool {
        Self::from_date(date) == *self
    }

    /// The month before this one.
    pub fn previous(&self) -> Self {
        if self.month == 0 {
            Self {
                year: self.year - 1,
                month: 11,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The `count` most recent periods ending at the period containing
    /// `today`, newest first.
    pub fn recent(today: Date, count: usize) -> Vec<Self> {
        let mut periods = Vec::with_capacity(count);
        let mut period = Self::from_date(today);

        for _ in 0..count {
            periods.push(period);
            period = period.previous();
        }

        periods
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
