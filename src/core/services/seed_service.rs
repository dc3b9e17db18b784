//! Canned demo dataset for exercising the reporting surface.

use crate::errors::FinanceError;
use crate::ledger::Ledger;

use super::{AccountService, IncomeService, ServiceResult, TransactionService};

const SEED_ACCOUNTS: &[(&str, &str, &str)] = &[
    ("ACC001", "Main Checking", "USD"),
    ("ACC002", "Savings", "USD"),
    ("ACC003", "Euro Account", "EUR"),
];

const SEED_TRANSACTIONS: &[(&str, &str, &str, f64, &str, &str, &str)] = &[
    ("TXN001", "ACC001", "2024-07-15", 150.00, "expense", "Groceries", "Weekly shopping"),
    ("TXN002", "ACC001", "2024-07-20", 50.00, "expense", "Transport", "Gas"),
    ("TXN003", "ACC001", "2024-08-10", 200.00, "expense", "Utilities", "Electric bill"),
    ("TXN004", "ACC001", "2024-08-15", 80.00, "expense", "Entertainment", "Movies"),
    ("TXN005", "ACC001", "2024-09-05", 120.00, "expense", "Groceries", "Weekly shopping"),
    ("TXN006", "ACC001", "2024-09-20", 300.00, "expense", "Shopping", "Clothes"),
    ("TXN007", "ACC001", "2024-10-10", 175.00, "expense", "Groceries", "Weekly shopping"),
    ("TXN008", "ACC001", "2024-10-25", 90.00, "expense", "Dining", "Restaurant"),
    ("TXN009", "ACC001", "2024-11-05", 250.00, "expense", "Utilities", "Internet + Phone"),
    ("TXN010", "ACC001", "2024-11-15", 100.00, "expense", "Entertainment", "Concert tickets"),
    ("TXN011", "ACC001", "2024-12-01", 180.00, "expense", "Groceries", "Weekly shopping"),
    ("TXN012", "ACC001", "2024-12-10", 500.00, "expense", "Shopping", "Christmas gifts"),
];

const SEED_INCOME: &[(&str, &str, &str, f64, &str)] = &[
    ("INC001", "ACC001", "2024-07-01", 3000.00, "Salary"),
    ("INC002", "ACC001", "2024-07-15", 500.00, "Freelance"),
    ("INC003", "ACC001", "2024-08-01", 3000.00, "Salary"),
    ("INC004", "ACC001", "2024-08-20", 300.00, "Freelance"),
    ("INC005", "ACC001", "2024-09-01", 3200.00, "Salary"),
    ("INC006", "ACC001", "2024-10-01", 3200.00, "Salary"),
    ("INC007", "ACC001", "2024-10-10", 800.00, "Freelance"),
    ("INC008", "ACC001", "2024-11-01", 3400.00, "Salary"),
    ("INC009", "ACC001", "2024-11-25", 200.00, "Bonus"),
    ("INC010", "ACC001", "2024-12-01", 3400.00, "Salary"),
    ("INC011", "ACC001", "2024-12-15", 1000.00, "Year-end Bonus"),
];

/// Rows newly inserted by a seeding pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedReport {
    pub accounts: usize,
    pub transactions: usize,
    pub income_records: usize,
}

pub struct SeedService;

impl SeedService {
    /// Inserts the demo dataset, skipping rows that already exist.
    pub fn seed_demo(ledger: &mut Ledger) -> ServiceResult<SeedReport> {
        let mut report = SeedReport::default();
        for (id, name, currency) in SEED_ACCOUNTS {
            match AccountService::create(ledger, id, name, currency) {
                Ok(_) => report.accounts += 1,
                Err(FinanceError::Conflict(_)) => {}
                Err(err) => return Err(err),
            }
        }
        for (id, account_id, date, amount, kind, category, note) in SEED_TRANSACTIONS {
            match TransactionService::create(
                ledger,
                id,
                account_id,
                date,
                *amount,
                kind,
                Some(category),
                Some(note),
            ) {
                Ok(_) => report.transactions += 1,
                Err(FinanceError::Conflict(_)) => {}
                Err(err) => return Err(err),
            }
        }
        for (id, account_id, date, amount, source) in SEED_INCOME {
            match IncomeService::create(ledger, id, account_id, date, *amount, Some(source)) {
                Ok(_) => report.income_records += 1,
                Err(FinanceError::Conflict(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_is_idempotent() {
        let mut ledger = Ledger::new("Seed");
        let first = SeedService::seed_demo(&mut ledger).unwrap();
        assert_eq!(first.accounts, 3);
        assert_eq!(first.transactions, 12);
        assert_eq!(first.income_records, 11);

        let second = SeedService::seed_demo(&mut ledger).unwrap();
        assert_eq!(second.accounts, 0);
        assert_eq!(second.transactions, 0);
        assert_eq!(second.income_records, 0);

        assert_eq!(ledger.accounts.len(), 3);
        assert_eq!(ledger.transactions.len(), 12);
        assert_eq!(ledger.income.len(), 11);
    }

    #[test]
    fn seeded_months_cover_july_through_december() {
        let mut ledger = Ledger::new("Seed");
        SeedService::seed_demo(&mut ledger).unwrap();

        let months: Vec<String> = ledger
            .monthly_income_totals()
            .iter()
            .map(|(month, _)| month.to_string())
            .collect();
        assert_eq!(
            months,
            vec!["2024-07", "2024-08", "2024-09", "2024-10", "2024-11", "2024-12"]
        );
        let totals: Vec<f64> = ledger
            .monthly_income_totals()
            .iter()
            .map(|(_, total)| *total)
            .collect();
        assert_eq!(totals, vec![3500.0, 3300.0, 3200.0, 4000.0, 3600.0, 4400.0]);
    }
}
