use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use finance_core::core::services::{ForecastService, StatsService};
use finance_core::domain::{Account, IncomeRecord, Transaction, TransactionKind};
use finance_core::ledger::Ledger;
use finance_core::storage::json_backend::{
    load_ledger_from_path as load_ledger_from_file, save_ledger_to_path as save_ledger_to_file,
};
use tempfile::tempdir;

const CATEGORIES: [&str; 5] = [
    "Groceries",
    "Transport",
    "Utilities",
    "Entertainment",
    "Dining",
];

fn build_sample_ledger(txn_count: usize) -> Ledger {
    let mut ledger = Ledger::new("Benchmark");

    ledger.add_account(Account::new("ACC001", "Checking", "USD"));
    ledger.add_account(Account::new("ACC002", "Savings", "USD"));
    ledger.add_account(Account::new("ACC003", "Euro Account", "EUR"));

    let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 730) as i64);
        let kind = if idx % 5 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let mut txn = Transaction::new(
            format!("TXN{idx:06}"),
            "ACC001",
            date,
            25.0 + (idx % 100) as f64,
            kind,
        );
        if idx % 3 != 0 {
            txn = txn.with_category(CATEGORIES[idx % CATEGORIES.len()]);
        }
        ledger.add_transaction(txn);
    }

    for month in 0..24u32 {
        let date = start_date + Duration::days((month * 30 + 1) as i64);
        ledger.add_income(
            IncomeRecord::new(
                format!("INC{month:04}"),
                "ACC002",
                date,
                3200.0 + (month * 40) as f64,
            )
            .with_source("Salary"),
        );
    }

    ledger
}

fn bench_ledger_io(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("ledger.json");

    c.bench_function("ledger_save_10k", |b| {
        b.iter(|| {
            save_ledger_to_file(&ledger, &file_path).expect("save ledger");
        })
    });

    save_ledger_to_file(&ledger, &file_path).expect("seed");

    c.bench_function("ledger_load_10k", |b| {
        b.iter(|| {
            let loaded = load_ledger_from_file(&file_path).expect("load ledger");
            black_box(loaded);
        })
    });
}

fn bench_reports(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));

    c.bench_function("stats_summary_10k", |b| {
        b.iter(|| {
            let summary = StatsService::summary(&ledger, None, None).expect("summary");
            black_box(summary);
        })
    });

    c.bench_function("stats_summary_windowed_10k", |b| {
        b.iter(|| {
            let summary = StatsService::summary(&ledger, Some("2023-06-01"), Some("2024-05-31"))
                .expect("summary");
            black_box(summary);
        })
    });

    c.bench_function("income_forecast_24m", |b| {
        b.iter_batched(
            || ledger.clone(),
            |ledger_clone| {
                let forecast = ForecastService::income_forecast(&ledger_clone, 12);
                black_box(forecast);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_ledger_io, bench_reports);
criterion_main!(benches);
