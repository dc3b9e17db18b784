mod common;

use common::setup_test_env;
use finance_core::core::services::{SeedService, StatsService};
use finance_core::ledger::Ledger;

fn seeded_ledger() -> Ledger {
    let mut ledger = Ledger::new("Stats Suite");
    SeedService::seed_demo(&mut ledger).expect("seed demo data");
    ledger
}

#[test]
fn seeded_summary_reconciles_with_its_breakdowns() {
    let ledger = seeded_ledger();
    let summary = StatsService::summary(&ledger, None, None).expect("summary");

    assert_eq!(summary.transactions.count, 12);
    assert_eq!(summary.transactions.total_expenses, 2195.0);
    assert_eq!(summary.transactions.total_income, 0.0);
    assert_eq!(summary.transactions.expense_median, 162.5);
    assert_eq!(summary.income.count, 11);
    assert_eq!(summary.income.total, 22000.0);
    assert_eq!(summary.income.mean, 2000.0);
    assert_eq!(summary.income.median, 3000.0);
    assert_eq!(summary.income.min, 200.0);
    assert_eq!(summary.income.max, 3400.0);

    let category_total: f64 = summary
        .category_breakdown
        .values()
        .map(|slice| slice.total)
        .sum();
    assert!((category_total - summary.transactions.total_expenses).abs() < 1e-9);

    let source_total: f64 = summary
        .source_breakdown
        .values()
        .map(|slice| slice.total)
        .sum();
    assert!((source_total - summary.income.total).abs() < 1e-9);

    // Expense shares cover the whole pie, give or take per-slice rounding.
    let percent_total: f64 = summary
        .category_breakdown
        .values()
        .map(|slice| slice.percentage)
        .sum();
    assert!((percent_total - 100.0).abs() < 0.05);
}

#[test]
fn seeded_groceries_slice_has_exact_figures() {
    let ledger = seeded_ledger();
    let stats = StatsService::transaction_stats(&ledger, None, None).expect("stats");

    let groceries = &stats.by_category["Groceries"];
    assert_eq!(groceries.count, 4);
    assert_eq!(groceries.total, 625.0);
    assert_eq!(groceries.mean, 156.25);
    assert_eq!(groceries.percentage, 28.47);
    assert_eq!(stats.net, -2195.0);
}

#[test]
fn windowed_reports_keep_only_fourth_quarter_rows() {
    let ledger = seeded_ledger();
    let stats = StatsService::transaction_stats(&ledger, Some("2024-10-01"), Some("2024-12-31"))
        .expect("windowed stats");
    assert_eq!(stats.total_transactions, 6);

    let income = StatsService::income_stats(&ledger, Some("2024-10-01"), Some("2024-12-31"))
        .expect("windowed income stats");
    assert_eq!(income.total_records, 6);
    assert_eq!(income.period.from.as_deref(), Some("2024-10-01"));
    assert_eq!(income.period.to.as_deref(), Some("2024-12-31"));
}

#[test]
fn reports_do_not_change_across_save_and_reload() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Stable").expect("create ledger");
    {
        let ledger = manager.require_current_mut().expect("current ledger");
        SeedService::seed_demo(ledger).expect("seed");
    }
    let before = {
        let ledger = manager.require_current().expect("current ledger");
        serde_json::to_string(&StatsService::summary(ledger, None, None).expect("summary"))
            .expect("serialize summary")
    };
    manager.save().expect("save ledger");

    manager.clear();
    manager.open("Stable").expect("reopen ledger");
    let after = {
        let ledger = manager.require_current().expect("current ledger");
        serde_json::to_string(&StatsService::summary(ledger, None, None).expect("summary"))
            .expect("serialize summary")
    };
    assert_eq!(before, after);
}

#[test]
fn repeated_summaries_serialize_identically() {
    let ledger = seeded_ledger();
    let first = serde_json::to_string(&StatsService::summary(&ledger, None, None).unwrap())
        .expect("serialize");
    let second = serde_json::to_string(&StatsService::summary(&ledger, None, None).unwrap())
        .expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn malformed_window_bounds_fail_loudly() {
    let ledger = seeded_ledger();
    let err = StatsService::summary(&ledger, Some("10/01/2024"), None).unwrap_err();
    assert_eq!(err.to_string(), "from_date must be in YYYY-MM-DD format");
}
