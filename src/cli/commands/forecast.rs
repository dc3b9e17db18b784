//! Forecast commands projecting income and expenses forward.

use crate::cli::commands::KeyValueArgs;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::core::services::ForecastService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::protected(
        "forecast",
        "Project income and expenses from monthly history",
        "forecast <income|expenses> [months=N]",
        cmd_forecast,
    )]
}

fn cmd_forecast(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: forecast <income|expenses> [months=N]".into(),
        ));
    };
    let months = parse_months(context, rest)?;
    let ledger = context.require_ledger()?;

    match subcommand.to_ascii_lowercase().as_str() {
        "income" => {
            let report = ForecastService::income_forecast(ledger, months);
            output::section(format!("Income forecast ({} months)", months));
            output::payload(serde_json::to_string_pretty(&report)?);
        }
        "expenses" | "expense" => {
            let report = ForecastService::expense_trend(ledger, months);
            output::section(format!("Expense trend ({} months)", months));
            output::payload(serde_json::to_string_pretty(&report)?);
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown forecast subcommand `{}`. Available: income, expenses",
                other
            )))
        }
    }
    Ok(())
}

fn parse_months(context: &ShellContext, args: &[&str]) -> Result<u32, CommandError> {
    let options = KeyValueArgs::parse(args, &["months"])?;
    let months = match options.get("months") {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid months value `{}`", raw))
        })?,
        None => context.config.default_forecast_months,
    };
    if !(1..=12).contains(&months) {
        return Err(CommandError::InvalidArguments(
            "months must be between 1 and 12".into(),
        ));
    }
    Ok(months)
}
