//! Statistics reports over the open ledger.

use crate::cli::commands::KeyValueArgs;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::core::services::StatsService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::protected(
        "stats",
        "Report statistics over transactions and income",
        "stats <summary|transactions|income> [from=YYYY-MM-DD] [to=YYYY-MM-DD]",
        cmd_stats,
    )]
}

fn cmd_stats(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: stats <summary|transactions|income> [from=] [to=]".into(),
        ));
    };
    let filters = KeyValueArgs::parse(rest, &["from", "to"])?;
    let (from, to) = (filters.get("from"), filters.get("to"));
    let ledger = context.require_ledger()?;

    match subcommand.to_ascii_lowercase().as_str() {
        "summary" => {
            let report = StatsService::summary(ledger, from, to)?;
            output::section("Summary");
            output::payload(serde_json::to_string_pretty(&report)?);
        }
        "transactions" | "transaction" => {
            let report = StatsService::transaction_stats(ledger, from, to)?;
            output::section("Transaction statistics");
            output::payload(serde_json::to_string_pretty(&report)?);
        }
        "income" => {
            let report = StatsService::income_stats(ledger, from, to)?;
            output::section("Income statistics");
            output::payload(serde_json::to_string_pretty(&report)?);
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown stats subcommand `{}`. Available: summary, transactions, income",
                other
            )))
        }
    }
    Ok(())
}
