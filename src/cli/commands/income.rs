//! Income record CRUD and filtered listing commands.

use crate::cli::commands::{parse_amount, KeyValueArgs};
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};
use crate::core::services::IncomeService;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::protected(
        "income",
        "Record and query income history",
        "income <add <id> <account> <date> <amount> [source]|list [key=value...]|show <id>|edit <id> key=value...|remove <id>>",
        cmd_income,
    )]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: income <add|list|show|edit|remove>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" | "create" => handle_add(context, rest),
        "list" | "ls" => handle_list(context, rest),
        "show" => handle_show(context, rest),
        "edit" | "update" => handle_edit(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown income subcommand `{}`. Available: add, list, show, edit, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, account_id, date, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: income add <id> <account> <date> <amount> [source]".into(),
        ));
    };
    if rest.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "usage: income add <id> <account> <date> <amount> [source]".into(),
        ));
    }
    let amount = parse_amount(amount)?;
    let source = rest.first().copied();
    let ledger = context.require_ledger_mut()?;
    let record = IncomeService::create(ledger, id, account_id, date, amount, source)?;
    io::print_success(format!("Income '{}' created.", record.id));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filters = KeyValueArgs::parse(args, &["account", "from", "to", "source"])?;
    let ledger = context.require_ledger()?;
    let records = IncomeService::list(
        ledger,
        filters.get("account"),
        filters.get("from"),
        filters.get("to"),
        filters.get("source"),
    )?;
    if records.is_empty() {
        io::print_info("No income records match.");
        return Ok(());
    }
    output::section(format!("Income records ({})", records.len()));
    for record in records {
        output::payload(format!("  {}", record.display_label()));
    }
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: income show <id>".into(),
        ));
    };
    let ledger = context.require_ledger()?;
    let record = IncomeService::get(ledger, id)?;
    output::payload(serde_json::to_string_pretty(record)?);
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: income edit <id> [date=...] [amount=...] [source=...]".into(),
        ));
    };
    let fields = KeyValueArgs::parse(rest, &["date", "amount", "source"])?;
    if fields.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change. Provide at least one of date=, amount=, source=".into(),
        ));
    }
    let amount = fields.get("amount").map(parse_amount).transpose()?;
    let id = (*id).to_string();
    let ledger = context.require_ledger_mut()?;
    let record = IncomeService::update(
        ledger,
        &id,
        fields.get("date"),
        amount,
        fields.get("source"),
    )?;
    io::print_success(format!("Income '{}' updated.", record.id));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: income remove <id>".into(),
        ));
    };
    let id = (*id).to_string();
    if !context.confirm(&format!("Delete income record '{}'?", id))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let ledger = context.require_ledger_mut()?;
    IncomeService::delete(ledger, &id)?;
    io::print_success(format!("Income '{}' deleted.", id));
    Ok(())
}
