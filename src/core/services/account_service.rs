use crate::domain::Account;
use crate::errors::FinanceError;
use crate::ledger::Ledger;

use super::ServiceResult;

pub struct AccountService;

impl AccountService {
    pub fn create(
        ledger: &mut Ledger,
        id: &str,
        name: &str,
        currency: &str,
    ) -> ServiceResult<Account> {
        if id.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Account ID cannot be empty".into(),
            ));
        }
        if name.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Account name cannot be empty".into(),
            ));
        }
        Self::validate_currency(currency)?;

        let id = id.trim();
        if ledger.account(id).is_some() {
            return Err(FinanceError::Conflict(format!(
                "Account with ID '{}' already exists",
                id
            )));
        }

        let account = Account::new(id, name.trim(), currency.to_uppercase());
        ledger.add_account(account.clone());
        Ok(account)
    }

    pub fn get<'a>(ledger: &'a Ledger, id: &str) -> ServiceResult<&'a Account> {
        ledger
            .account(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Account '{}' not found", id)))
    }

    /// All accounts, ordered by name.
    pub fn list(ledger: &Ledger) -> Vec<&Account> {
        ledger.accounts_sorted()
    }

    pub fn update(
        ledger: &mut Ledger,
        id: &str,
        name: Option<&str>,
        currency: Option<&str>,
    ) -> ServiceResult<Account> {
        if ledger.account(id).is_none() {
            return Err(FinanceError::NotFound(format!(
                "Account with ID '{}' not found",
                id
            )));
        }
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(FinanceError::Validation(
                    "Account name cannot be empty".into(),
                ));
            }
        }
        if let Some(currency) = currency {
            Self::validate_currency(currency)?;
        }

        let account = ledger
            .account_mut(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Account with ID '{}' not found", id)))?;
        if name.is_none() && currency.is_none() {
            return Ok(account.clone());
        }
        if let Some(name) = name {
            account.name = name.trim().to_string();
        }
        if let Some(currency) = currency {
            account.currency = currency.to_uppercase();
        }
        let updated = account.clone();
        ledger.touch();
        Ok(updated)
    }

    /// Deletes the account and, with it, every transaction and income
    /// record posted against it.
    pub fn delete(ledger: &mut Ledger, id: &str) -> ServiceResult<Account> {
        ledger
            .remove_account(id)
            .ok_or_else(|| FinanceError::NotFound(format!("Account '{}' not found", id)))
    }

    fn validate_currency(currency: &str) -> ServiceResult<()> {
        if currency.chars().count() != 3 {
            return Err(FinanceError::Validation(
                "Currency must be a 3-letter code".into(),
            ));
        }
        Ok(())
    }
}
