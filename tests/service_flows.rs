mod common;

use common::setup_test_env;
use finance_core::core::services::{
    AccountService, IncomeService, SeedService, SessionService, TransactionService,
};
use finance_core::errors::FinanceError;
use finance_core::ledger::Ledger;

#[test]
fn account_lifecycle_survives_a_save_and_reload() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Household").expect("create ledger");

    {
        let ledger = manager.require_current_mut().expect("current ledger");
        AccountService::create(ledger, "ACC001", "Checking", "USD").expect("create account");
        AccountService::update(ledger, "ACC001", Some("Everyday Checking"), None)
            .expect("rename account");
    }
    manager.save().expect("save ledger");

    manager.clear();
    manager.open("Household").expect("reopen ledger");
    let ledger = manager.require_current().expect("current ledger");
    let account = AccountService::get(ledger, "ACC001").expect("account persisted");
    assert_eq!(account.name, "Everyday Checking");
    assert_eq!(account.currency, "USD");
}

#[test]
fn deleting_an_account_cascades_to_postings() {
    let mut ledger = Ledger::new("Cascade");
    AccountService::create(&mut ledger, "ACC001", "Checking", "USD").unwrap();
    AccountService::create(&mut ledger, "ACC002", "Savings", "USD").unwrap();
    TransactionService::create(
        &mut ledger, "TXN001", "ACC001", "2024-01-05", 50.0, "expense", None, None,
    )
    .unwrap();
    TransactionService::create(
        &mut ledger, "TXN002", "ACC002", "2024-01-06", 75.0, "expense", None, None,
    )
    .unwrap();
    IncomeService::create(&mut ledger, "INC001", "ACC001", "2024-01-01", 3000.0, None).unwrap();

    AccountService::delete(&mut ledger, "ACC001").expect("delete account");

    assert!(ledger.account("ACC001").is_none());
    assert!(ledger.transaction("TXN001").is_none());
    assert!(ledger.income_record("INC001").is_none());
    // Postings on other accounts stay put.
    assert!(ledger.transaction("TXN002").is_some());
}

#[test]
fn sessions_persist_with_the_ledger_file() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Auth").expect("create ledger");

    let token = {
        let ledger = manager.require_current_mut().expect("current ledger");
        SessionService::register(ledger, "alice", "hunter2").expect("register");
        SessionService::login(ledger, "alice", "hunter2").expect("login")
    };
    manager.save().expect("save ledger");

    manager.clear();
    manager.open("Auth").expect("reopen ledger");
    let ledger = manager.require_current().expect("current ledger");
    let user = SessionService::require(ledger, Some(&token)).expect("token survives reload");
    assert_eq!(user.username, "alice");
}

#[test]
fn logging_out_invalidates_a_persisted_token() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Auth").expect("create ledger");

    let token = {
        let ledger = manager.require_current_mut().expect("current ledger");
        SessionService::register(ledger, "alice", "hunter2").expect("register");
        let token = SessionService::login(ledger, "alice", "hunter2").expect("login");
        SessionService::logout(ledger, &token).expect("logout");
        token
    };
    manager.save().expect("save ledger");

    manager.clear();
    manager.open("Auth").expect("reopen ledger");
    let ledger = manager.require_current().expect("current ledger");
    let err = SessionService::require(ledger, Some(&token)).unwrap_err();
    assert!(matches!(err, FinanceError::Unauthorized));
}

#[test]
fn seeding_a_reloaded_ledger_adds_nothing_new() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Seeded").expect("create ledger");

    {
        let ledger = manager.require_current_mut().expect("current ledger");
        let report = SeedService::seed_demo(ledger).expect("first seed");
        assert_eq!(report.accounts, 3);
    }
    manager.save().expect("save ledger");

    manager.clear();
    manager.open("Seeded").expect("reopen ledger");
    let ledger = manager.require_current_mut().expect("current ledger");
    let report = SeedService::seed_demo(ledger).expect("second seed");
    assert_eq!(report.accounts, 0);
    assert_eq!(report.transactions, 0);
    assert_eq!(report.income_records, 0);
    assert_eq!(ledger.transactions.len(), 12);
    assert_eq!(ledger.income.len(), 11);
}

#[test]
fn duplicate_ledger_names_conflict() {
    let (mut manager, _config) = setup_test_env();
    manager.create("Family").expect("create ledger");
    let err = manager.create("Family").unwrap_err();
    assert_eq!(err.to_string(), "Ledger 'Family' already exists");
}

#[test]
fn editing_a_transaction_changes_only_the_given_fields() {
    let mut ledger = Ledger::new("Edits");
    AccountService::create(&mut ledger, "ACC001", "Checking", "USD").unwrap();
    TransactionService::create(
        &mut ledger,
        "TXN001",
        "ACC001",
        "2024-03-01",
        80.0,
        "expense",
        Some("Dining"),
        Some("team lunch"),
    )
    .unwrap();

    let updated =
        TransactionService::update(&mut ledger, "TXN001", None, Some(95.5), None, None, None)
            .expect("update amount");

    assert_eq!(updated.amount, 95.5);
    assert_eq!(updated.category.as_deref(), Some("Dining"));
    assert_eq!(updated.note.as_deref(), Some("team lunch"));
    assert_eq!(updated.date.to_string(), "2024-03-01");
}

#[test]
fn income_filters_narrow_by_source_and_window() {
    let mut ledger = Ledger::new("Filters");
    AccountService::create(&mut ledger, "ACC001", "Checking", "USD").unwrap();
    IncomeService::create(
        &mut ledger,
        "INC001",
        "ACC001",
        "2024-01-01",
        3000.0,
        Some("Salary"),
    )
    .unwrap();
    IncomeService::create(
        &mut ledger,
        "INC002",
        "ACC001",
        "2024-01-15",
        400.0,
        Some("Freelance"),
    )
    .unwrap();
    IncomeService::create(
        &mut ledger,
        "INC003",
        "ACC001",
        "2024-02-01",
        3000.0,
        Some("Salary"),
    )
    .unwrap();

    let rows = IncomeService::list(&ledger, None, None, None, Some("Salary")).unwrap();
    assert_eq!(rows.len(), 2);

    let rows = IncomeService::list(
        &ledger,
        None,
        Some("2024-01-01"),
        Some("2024-01-31"),
        Some("Salary"),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "INC001");
}
