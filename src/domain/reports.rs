use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::month::MonthlyTotal;

/// Echo of the raw date bounds a report was computed over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Period {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl Period {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.map(|value| value.to_string()),
            to: to.map(|value| value.to_string()),
        }
    }
}

/// Descriptive statistics over a set of amounts. All-zero when the input
/// was empty; `std_dev` is the sample standard deviation and stays 0 for
/// fewer than two values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BasicStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Per-label slice of a breakdown map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub percentage: f64,
}

/// Transaction statistics over an optional date window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionStats {
    pub period: Period,
    pub total_transactions: usize,
    pub expenses: BasicStats,
    pub income: BasicStats,
    pub net: f64,
    pub by_category: BTreeMap<String, CategoryBreakdown>,
}

/// Income record statistics over an optional date window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeStats {
    pub period: Period,
    pub total_records: usize,
    pub stats: BasicStats,
    pub by_source: BTreeMap<String, CategoryBreakdown>,
}

/// Flattened transaction figures surfaced by the composite summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionTotals {
    pub count: usize,
    pub total_expenses: f64,
    pub total_income: f64,
    pub expense_mean: f64,
    pub expense_median: f64,
    pub expense_std_dev: f64,
    pub expense_min: f64,
    pub expense_max: f64,
}

/// Flattened income figures surfaced by the composite summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeTotals {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Composite report combining transaction and income statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub period: Period,
    pub transactions: TransactionTotals,
    pub income: IncomeTotals,
    pub category_breakdown: BTreeMap<String, CategoryBreakdown>,
    pub source_breakdown: BTreeMap<String, CategoryBreakdown>,
}

/// One projected month of income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomePoint {
    pub month: String,
    pub predicted_income: f64,
}

/// One projected month of expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpensePoint {
    pub month: String,
    pub predicted_expense: f64,
}

/// Fitted-model diagnostics attached to income forecasts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub interpretation: String,
}

/// Income projection with observed history and model diagnostics.
///
/// Insufficient history is reported through the `error` field rather than
/// a failure: history stays populated, the forecast stays empty, and no
/// model info is attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeForecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub history: Vec<MonthlyTotal>,
    pub forecast: Vec<IncomePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_info: Option<ModelInfo>,
}

/// Expense projection with observed history. Carries no model diagnostics,
/// and its insufficient-data variant reports an empty history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseTrend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub history: Vec<MonthlyTotal>,
    pub forecast: Vec<ExpensePoint>,
}
