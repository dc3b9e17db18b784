//! Business logic helpers for managing income records.

use crate::domain::IncomeRecord;
use crate::errors::FinanceError;
use crate::ledger::{parse_date_bound, DateWindow, IncomeQuery, Ledger};

use super::ServiceResult;

/// Provides validated CRUD helpers for income records.
pub struct IncomeService;

impl IncomeService {
    pub fn create(
        ledger: &mut Ledger,
        id: &str,
        account_id: &str,
        date: &str,
        amount: f64,
        source: Option<&str>,
    ) -> ServiceResult<IncomeRecord> {
        if id.trim().is_empty() {
            return Err(FinanceError::Validation("Income ID cannot be empty".into()));
        }
        if account_id.is_empty() {
            return Err(FinanceError::Validation("Account ID is required".into()));
        }
        if ledger.account(account_id).is_none() {
            return Err(FinanceError::Validation(format!(
                "Account '{}' does not exist",
                account_id
            )));
        }
        let date = parse_date_bound("Date", date)?;
        if amount <= 0.0 {
            return Err(FinanceError::Validation("Amount must be positive".into()));
        }

        let id = id.trim();
        if ledger.income_record(id).is_some() {
            return Err(FinanceError::Conflict(format!(
                "Income with ID '{}' already exists",
                id
            )));
        }

        let mut record = IncomeRecord::new(id, account_id, date, amount);
        if let Some(source) = source {
            record = record.with_source(source);
        }
        ledger.add_income(record.clone());
        Ok(record)
    }

    pub fn get<'a>(ledger: &'a Ledger, id: &str) -> ServiceResult<&'a IncomeRecord> {
        ledger
            .income_record(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Income '{}' not found", id)))
    }

    /// Income records newest first, optionally narrowed by account, date
    /// window, or source.
    pub fn list<'a>(
        ledger: &'a Ledger,
        account_id: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        source: Option<&str>,
    ) -> ServiceResult<Vec<&'a IncomeRecord>> {
        let window = DateWindow::parse(from, to)?;
        Ok(ledger.income_matching(&IncomeQuery {
            account_id,
            window,
            source,
        }))
    }

    pub fn update(
        ledger: &mut Ledger,
        id: &str,
        date: Option<&str>,
        amount: Option<f64>,
        source: Option<&str>,
    ) -> ServiceResult<IncomeRecord> {
        if ledger.income_record(id).is_none() {
            return Err(FinanceError::NotFound(format!(
                "Income with ID '{}' not found",
                id
            )));
        }
        let date = date.map(|raw| parse_date_bound("Date", raw)).transpose()?;
        if let Some(amount) = amount {
            if amount <= 0.0 {
                return Err(FinanceError::Validation("Amount must be positive".into()));
            }
        }

        let record = ledger
            .income_record_mut(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Income with ID '{}' not found", id)))?;
        if date.is_none() && amount.is_none() && source.is_none() {
            return Ok(record.clone());
        }
        if let Some(date) = date {
            record.date = date;
        }
        if let Some(amount) = amount {
            record.amount = amount;
        }
        if let Some(source) = source {
            record.source = Some(source.to_string());
        }
        let updated = record.clone();
        ledger.touch();
        Ok(updated)
    }

    pub fn delete(ledger: &mut Ledger, id: &str) -> ServiceResult<IncomeRecord> {
        ledger
            .remove_income(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Income '{}' not found", id)))
    }
}
