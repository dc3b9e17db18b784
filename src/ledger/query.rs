use chrono::NaiveDate;

use crate::errors::{FinanceError, Result};

/// Parses a `YYYY-MM-DD` bound, naming the offending field in the error.
pub fn parse_date_bound(label: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FinanceError::Validation(format!("{label} must be in YYYY-MM-DD format")))
}

/// Inclusive date window with optional bounds on either side.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateWindow {
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = from
            .map(|raw| parse_date_bound("from_date", raw))
            .transpose()?;
        let to = to.map(|raw| parse_date_bound("to_date", raw)).transpose()?;
        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Filter for transaction listings and reports. `kind` and `category`
/// match the stored values exactly; an unrecognized kind or a category a
/// transaction does not carry simply matches nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionQuery<'a> {
    pub account_id: Option<&'a str>,
    pub window: DateWindow,
    pub kind: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Filter for income-record listings and reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomeQuery<'a> {
    pub account_id: Option<&'a str>,
    pub window: DateWindow,
    pub source: Option<&'a str>,
}
