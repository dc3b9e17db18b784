//! Business logic helpers for managing transactions.

use crate::domain::{Transaction, TransactionKind};
use crate::errors::FinanceError;
use crate::ledger::{parse_date_bound, DateWindow, Ledger, TransactionQuery};

use super::ServiceResult;

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        ledger: &mut Ledger,
        id: &str,
        account_id: &str,
        date: &str,
        amount: f64,
        kind: &str,
        category: Option<&str>,
        note: Option<&str>,
    ) -> ServiceResult<Transaction> {
        if id.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Transaction ID cannot be empty".into(),
            ));
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
        let kind = Self::parse_kind(kind)?;

        let id = id.trim();
        if ledger.transaction(id).is_some() {
            return Err(FinanceError::Conflict(format!(
                "Transaction with ID '{}' already exists",
                id
            )));
        }

        let mut transaction = Transaction::new(id, account_id, date, amount, kind);
        if let Some(category) = category {
            transaction = transaction.with_category(category);
        }
        if let Some(note) = note {
            transaction = transaction.with_note(note);
        }
        ledger.add_transaction(transaction.clone());
        Ok(transaction)
    }

    pub fn get<'a>(ledger: &'a Ledger, id: &str) -> ServiceResult<&'a Transaction> {
        ledger
            .transaction(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Transaction '{}' not found", id)))
    }

    /// Transactions newest first, optionally narrowed by account, date
    /// window, kind, or category.
    pub fn list<'a>(
        ledger: &'a Ledger,
        account_id: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        kind: Option<&str>,
        category: Option<&str>,
    ) -> ServiceResult<Vec<&'a Transaction>> {
        let window = DateWindow::parse(from, to)?;
        Ok(ledger.transactions_matching(&TransactionQuery {
            account_id,
            window,
            kind,
            category,
        }))
    }

    /// Applies the provided fields to an existing transaction. The owning
    /// account cannot be changed.
    pub fn update(
        ledger: &mut Ledger,
        id: &str,
        date: Option<&str>,
        amount: Option<f64>,
        kind: Option<&str>,
        category: Option<&str>,
        note: Option<&str>,
    ) -> ServiceResult<Transaction> {
        if ledger.transaction(id).is_none() {
            return Err(FinanceError::NotFound(format!(
                "Transaction with ID '{}' not found",
                id
            )));
        }
        let date = date.map(|raw| parse_date_bound("Date", raw)).transpose()?;
        if let Some(amount) = amount {
            if amount <= 0.0 {
                return Err(FinanceError::Validation("Amount must be positive".into()));
            }
        }
        let kind = kind.map(Self::parse_kind).transpose()?;

        let transaction = ledger.transaction_mut(id).ok_or_else(|| {
            FinanceError::NotFound(format!("Transaction with ID '{}' not found", id))
        })?;
        if date.is_none()
            && amount.is_none()
            && kind.is_none()
            && category.is_none()
            && note.is_none()
        {
            return Ok(transaction.clone());
        }
        if let Some(date) = date {
            transaction.date = date;
        }
        if let Some(amount) = amount {
            transaction.amount = amount;
        }
        if let Some(kind) = kind {
            transaction.kind = kind;
        }
        if let Some(category) = category {
            transaction.category = Some(category.to_string());
        }
        if let Some(note) = note {
            transaction.note = Some(note.to_string());
        }
        let updated = transaction.clone();
        ledger.touch();
        Ok(updated)
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn delete(ledger: &mut Ledger, id: &str) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Transaction '{}' not found", id)))
    }

    fn parse_kind(raw: &str) -> ServiceResult<TransactionKind> {
        raw.parse()
            .map_err(|_| FinanceError::Validation("Type must be 'expense' or 'income'".into()))
    }
}
