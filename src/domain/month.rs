use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Total amount observed during one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

impl MonthlyTotal {
    pub fn new(month: impl Into<String>, total: f64) -> Self {
        Self {
            month: month.into(),
            total,
        }
    }
}

/// A calendar month expressed as `YYYY-MM`, with arithmetic over the
/// combined year/month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parses a `YYYY-MM` month label.
    pub fn parse(value: &str) -> Option<Self> {
        let (year_part, month_part) = value.split_once('-')?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return None;
        }
        let year: i32 = year_part.parse().ok()?;
        let month: u32 = month_part.parse().ok()?;
        Self::new(year, month)
    }

    pub fn add_months(self, months: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + months as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
