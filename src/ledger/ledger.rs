use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, IncomeRecord, MonthKey, Transaction, TransactionKind, User,
};

use super::query::{IncomeQuery, TransactionQuery};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// In-memory ledger holding every record a single data file persists.
///
/// The ledger stores rows and answers filtered queries; validation of
/// incoming data belongs to the services layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub income: Vec<IncomeRecord>,
    #[serde(default)]
    pub users: Vec<User>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            accounts: Vec::new(),
            transactions: Vec::new(),
            income: Vec::new(),
            users: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    // Accounts.

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
        self.touch();
    }

    /// Removes an account along with every transaction and income record
    /// posted against it.
    pub fn remove_account(&mut self, id: &str) -> Option<Account> {
        let position = self.accounts.iter().position(|account| account.id == id)?;
        let removed = self.accounts.remove(position);
        self.transactions
            .retain(|transaction| transaction.account_id != id);
        self.income.retain(|record| record.account_id != id);
        self.touch();
        Some(removed)
    }

    /// Accounts ordered by name, as listings present them.
    pub fn accounts_sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.iter().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }

    // Transactions.

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    pub fn transaction_mut(&mut self, id: &str) -> Option<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
        self.touch();
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let position = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)?;
        let removed = self.transactions.remove(position);
        self.touch();
        Some(removed)
    }

    /// Transactions matching the query, newest first. Records sharing a
    /// date keep their insertion order.
    pub fn transactions_matching(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|transaction| {
                query
                    .account_id
                    .map_or(true, |account_id| transaction.account_id == account_id)
                    && query.window.contains(transaction.date)
                    && query
                        .kind
                        .map_or(true, |kind| transaction.kind.as_str() == kind)
                    && query
                        .category
                        .map_or(true, |category| {
                            transaction.category.as_deref() == Some(category)
                        })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    // Income records.

    pub fn income_record(&self, id: &str) -> Option<&IncomeRecord> {
        self.income.iter().find(|record| record.id == id)
    }

    pub fn income_record_mut(&mut self, id: &str) -> Option<&mut IncomeRecord> {
        self.income.iter_mut().find(|record| record.id == id)
    }

    pub fn add_income(&mut self, record: IncomeRecord) {
        self.income.push(record);
        self.touch();
    }

    pub fn remove_income(&mut self, id: &str) -> Option<IncomeRecord> {
        let position = self.income.iter().position(|record| record.id == id)?;
        let removed = self.income.remove(position);
        self.touch();
        Some(removed)
    }

    /// Income records matching the query, newest first.
    pub fn income_matching(&self, query: &IncomeQuery) -> Vec<&IncomeRecord> {
        let mut rows: Vec<&IncomeRecord> = self
            .income
            .iter()
            .filter(|record| {
                query
                    .account_id
                    .map_or(true, |account_id| record.account_id == account_id)
                    && query.window.contains(record.date)
                    && query
                        .source
                        .map_or(true, |source| record.source.as_deref() == Some(source))
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    }

    // Users.

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.username == username)
    }

    pub fn user_by_token_mut(&mut self, token: &str) -> Option<&mut User> {
        self.users
            .iter_mut()
            .find(|user| user.token.as_deref() == Some(token))
    }

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
        self.touch();
    }

    // Monthly rollups.

    /// Income totals grouped by calendar month, oldest first. Totals are
    /// raw sums; rounding is left to the callers that present them.
    pub fn monthly_income_totals(&self) -> Vec<(MonthKey, f64)> {
        let mut totals: BTreeMap<MonthKey, f64> = BTreeMap::new();
        for record in &self.income {
            *totals.entry(MonthKey::from_date(record.date)).or_insert(0.0) += record.amount;
        }
        totals.into_iter().collect()
    }

    /// Expense totals grouped by calendar month, oldest first. Income
    /// transactions are ignored.
    pub fn monthly_expense_totals(&self) -> Vec<(MonthKey, f64)> {
        let mut totals: BTreeMap<MonthKey, f64> = BTreeMap::new();
        for transaction in &self.transactions {
            if transaction.kind != TransactionKind::Expense {
                continue;
            }
            *totals
                .entry(MonthKey::from_date(transaction.date))
                .or_insert(0.0) += transaction.amount;
        }
        totals.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ledger::query::DateWindow;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new("sample");
        ledger.add_account(Account::new("ACC001", "Checking", "USD"));
        ledger.add_account(Account::new("ACC002", "Savings", "USD"));
        ledger.add_transaction(
            Transaction::new(
                "TXN001",
                "ACC001",
                date("2024-01-10"),
                50.0,
                TransactionKind::Expense,
            )
            .with_category("Groceries"),
        );
        ledger.add_transaction(Transaction::new(
            "TXN002",
            "ACC001",
            date("2024-02-05"),
            75.0,
            TransactionKind::Expense,
        ));
        ledger.add_transaction(Transaction::new(
            "TXN003",
            "ACC002",
            date("2024-02-05"),
            20.0,
            TransactionKind::Income,
        ));
        ledger.add_income(IncomeRecord::new(
            "INC001",
            "ACC001",
            date("2024-01-01"),
            3000.0,
        ));
        ledger.add_income(IncomeRecord::new(
            "INC002",
            "ACC001",
            date("2024-02-01"),
            3100.0,
        ));
        ledger
    }

    #[test]
    fn queries_sort_newest_first_and_keep_ties_stable() {
        let ledger = sample_ledger();
        let rows = ledger.transactions_matching(&TransactionQuery::default());
        let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["TXN002", "TXN003", "TXN001"]);
    }

    #[test]
    fn query_filters_compose() {
        let ledger = sample_ledger();
        let query = TransactionQuery {
            account_id: Some("ACC001"),
            window: DateWindow::parse(Some("2024-02-01"), None).unwrap(),
            ..Default::default()
        };
        let rows = ledger.transactions_matching(&query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "TXN002");
    }

    #[test]
    fn removing_an_account_cascades_to_its_records() {
        let mut ledger = sample_ledger();
        assert!(ledger.remove_account("ACC001").is_some());
        assert!(ledger.account("ACC001").is_none());
        assert!(ledger.transactions.iter().all(|t| t.account_id != "ACC001"));
        assert!(ledger.income.is_empty());
        // Records on other accounts survive.
        assert!(ledger.transaction("TXN003").is_some());
    }

    #[test]
    fn monthly_income_totals_come_back_oldest_first() {
        let ledger = sample_ledger();
        let totals = ledger.monthly_income_totals();
        let labels: Vec<String> = totals.iter().map(|(month, _)| month.to_string()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02"]);
        assert_eq!(totals[0].1, 3000.0);
        assert_eq!(totals[1].1, 3100.0);
    }

    #[test]
    fn expense_totals_skip_income_transactions() {
        let ledger = sample_ledger();
        let totals = ledger.monthly_expense_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[1].1, 75.0);
    }
}
