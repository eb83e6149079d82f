use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar month, the only date precision the roadmap works with.
///
/// Serialised as a `YYYY-MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseYearMonthError {
    #[error("expected a YYYY-MM token, got '{0}'")]
    Format(String),
    #[error("month {0} is outside 01..=12")]
    Month(u32),
}

impl YearMonth {
    /// Build a token; `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Token for the `index`-th month counted from January of `origin_year`.
    pub fn from_month_index(origin_year: i32, index: i64) -> Self {
        let year = origin_year as i64 + index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        Self {
            year: year as i32,
            month,
        }
    }

    /// Months elapsed since January of `origin_year` (negative before it).
    pub fn month_index(&self, origin_year: i32) -> i64 {
        (self.year as i64 - origin_year as i64) * 12 + (self.month as i64 - 1)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Step forwards (or backwards for negative `months`).
    pub fn add_months(&self, months: i64) -> Self {
        Self::from_month_index(self.year, self.month_index(self.year) + months)
    }

    /// The month containing the local wall-clock date.
    pub fn current() -> Self {
        use chrono::Datelike;
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || ParseYearMonthError::Format(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(bad)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(bad());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }

        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;
        Self::new(year, month).ok_or(ParseYearMonthError::Month(month))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ParseYearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}
