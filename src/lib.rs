#![doc(test(attr(deny(warnings))))]

//! Finance Core keeps personal ledgers of accounts, transactions, and income
//! records, and reports statistics and income forecasts over them through an
//! interactive CLI shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
