//! Descriptive statistics over transactions and income records.

use std::collections::BTreeMap;

use crate::domain::{
    BasicStats, CategoryBreakdown, IncomeStats, IncomeTotals, Period, Summary, TransactionKind,
    TransactionStats, TransactionTotals,
};
use crate::ledger::{DateWindow, IncomeQuery, Ledger, TransactionQuery};
use crate::utils::round_to;

use super::ServiceResult;

pub struct StatsService;

impl StatsService {
    /// Descriptive statistics for a set of amounts. All-zero when the set
    /// is empty; `std_dev` is the sample deviation and stays 0 for a
    /// single value.
    pub fn basic_stats(values: &[f64]) -> BasicStats {
        if values.is_empty() {
            return BasicStats::default();
        }
        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let std_dev = if count > 1 {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };
        BasicStats {
            count,
            sum: round_to(sum, 2),
            mean: round_to(mean, 2),
            median: round_to(median(values), 2),
            min: round_to(values.iter().copied().fold(f64::INFINITY, f64::min), 2),
            max: round_to(values.iter().copied().fold(f64::NEG_INFINITY, f64::max), 2),
            std_dev: round_to(std_dev, 2),
        }
    }

    /// Transaction statistics over an optional date window, split by kind
    /// and grouped by category.
    pub fn transaction_stats(
        ledger: &Ledger,
        from: Option<&str>,
        to: Option<&str>,
    ) -> ServiceResult<TransactionStats> {
        let window = DateWindow::parse(from, to)?;
        let rows = ledger.transactions_matching(&TransactionQuery {
            window,
            ..Default::default()
        });
        let period = Period::new(from, to);

        if rows.is_empty() {
            return Ok(TransactionStats {
                period,
                total_transactions: 0,
                expenses: BasicStats::default(),
                income: BasicStats::default(),
                net: 0.0,
                by_category: BTreeMap::new(),
            });
        }

        let expense_amounts: Vec<f64> = rows
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .collect();
        let income_amounts: Vec<f64> = rows
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .collect();
        let expense_sum: f64 = expense_amounts.iter().sum();
        let income_sum: f64 = income_amounts.iter().sum();

        // Every transaction lands in the breakdown regardless of kind, and
        // each slice is expressed as a share of total expenses.
        let by_category = breakdown(
            rows.iter()
                .map(|t| (label_or(t.category.as_deref(), "Uncategorized"), t.amount)),
            expense_sum,
        );

        Ok(TransactionStats {
            period,
            total_transactions: rows.len(),
            expenses: Self::basic_stats(&expense_amounts),
            income: Self::basic_stats(&income_amounts),
            net: round_to(income_sum - expense_sum, 2),
            by_category,
        })
    }

    /// Income-record statistics over an optional date window, grouped by
    /// source.
    pub fn income_stats(
        ledger: &Ledger,
        from: Option<&str>,
        to: Option<&str>,
    ) -> ServiceResult<IncomeStats> {
        let window = DateWindow::parse(from, to)?;
        let rows = ledger.income_matching(&IncomeQuery {
            window,
            ..Default::default()
        });
        let period = Period::new(from, to);

        if rows.is_empty() {
            return Ok(IncomeStats {
                period,
                total_records: 0,
                stats: BasicStats::default(),
                by_source: BTreeMap::new(),
            });
        }

        let amounts: Vec<f64> = rows.iter().map(|record| record.amount).collect();
        let total: f64 = amounts.iter().sum();

        let by_source = breakdown(
            rows.iter()
                .map(|record| (label_or(record.source.as_deref(), "Unknown"), record.amount)),
            total,
        );

        Ok(IncomeStats {
            period,
            total_records: rows.len(),
            stats: Self::basic_stats(&amounts),
            by_source,
        })
    }

    /// Composite report flattening transaction and income statistics into
    /// one document.
    pub fn summary(ledger: &Ledger, from: Option<&str>, to: Option<&str>) -> ServiceResult<Summary> {
        let transaction_stats = Self::transaction_stats(ledger, from, to)?;
        let income_stats = Self::income_stats(ledger, from, to)?;

        Ok(Summary {
            period: Period::new(from, to),
            transactions: TransactionTotals {
                count: transaction_stats.total_transactions,
                total_expenses: transaction_stats.expenses.sum,
                total_income: transaction_stats.income.sum,
                expense_mean: transaction_stats.expenses.mean,
                expense_median: transaction_stats.expenses.median,
                expense_std_dev: transaction_stats.expenses.std_dev,
                expense_min: transaction_stats.expenses.min,
                expense_max: transaction_stats.expenses.max,
            },
            income: IncomeTotals {
                count: income_stats.total_records,
                total: income_stats.stats.sum,
                mean: income_stats.stats.mean,
                median: income_stats.stats.median,
                std_dev: income_stats.stats.std_dev,
                min: income_stats.stats.min,
                max: income_stats.stats.max,
            },
            category_breakdown: transaction_stats.by_category,
            source_breakdown: income_stats.by_source,
        })
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

fn label_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(label) if !label.is_empty() => label,
        _ => default,
    }
}

/// Groups labeled amounts and sizes each group against `denominator`
/// (0 percent when the denominator is empty).
fn breakdown<'a, I>(rows: I, denominator: f64) -> BTreeMap<String, CategoryBreakdown>
where
    I: Iterator<Item = (&'a str, f64)>,
{
    let mut groups: BTreeMap<String, (usize, f64)> = BTreeMap::new();
    for (label, amount) in rows {
        let entry = groups.entry(label.to_string()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += amount;
    }
    groups
        .into_iter()
        .map(|(label, (count, total))| {
            let percentage = if denominator > 0.0 {
                round_to(total / denominator * 100.0, 2)
            } else {
                0.0
            };
            (
                label,
                CategoryBreakdown {
                    count,
                    total: round_to(total, 2),
                    mean: round_to(total / count as f64, 2),
                    percentage,
                },
            )
        })
        .collect()
}
