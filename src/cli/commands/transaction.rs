//! Transaction CRUD and filtered listing commands.

use crate::cli::commands::{parse_amount, KeyValueArgs};
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};
use crate::core::services::TransactionService;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::protected(
        "transaction",
        "Record and query expenses and income postings",
        "transaction <add <id> <account> <date> <amount> <expense|income> [category] [note...]|list [key=value...]|show <id>|edit <id> key=value...|remove <id>>",
        cmd_transaction,
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction <add|list|show|edit|remove>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" | "create" => handle_add(context, rest),
        "list" | "ls" => handle_list(context, rest),
        "show" => handle_show(context, rest),
        "edit" | "update" => handle_edit(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction subcommand `{}`. Available: add, list, show, edit, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, account_id, date, amount, kind, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction add <id> <account> <date> <amount> <expense|income> [category] [note...]"
                .into(),
        ));
    };
    let amount = parse_amount(amount)?;
    let category = rest.first().copied();
    let note = if rest.len() > 1 {
        Some(rest[1..].join(" "))
    } else {
        None
    };
    let ledger = context.require_ledger_mut()?;
    let transaction = TransactionService::create(
        ledger,
        id,
        account_id,
        date,
        amount,
        kind,
        category,
        note.as_deref(),
    )?;
    io::print_success(format!("Transaction '{}' created.", transaction.id));
    Ok(())
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filters = KeyValueArgs::parse(args, &["account", "from", "to", "type", "category"])?;
    let ledger = context.require_ledger()?;
    let transactions = TransactionService::list(
        ledger,
        filters.get("account"),
        filters.get("from"),
        filters.get("to"),
        filters.get("type"),
        filters.get("category"),
    )?;
    if transactions.is_empty() {
        io::print_info("No transactions match.");
        return Ok(());
    }
    output::section(format!("Transactions ({})", transactions.len()));
    for transaction in transactions {
        output::payload(format!("  {}", transaction.display_label()));
    }
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction show <id>".into(),
        ));
    };
    let ledger = context.require_ledger()?;
    let transaction = TransactionService::get(ledger, id)?;
    output::payload(serde_json::to_string_pretty(transaction)?);
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction edit <id> [date=...] [amount=...] [type=...] [category=...] [note=...]"
                .into(),
        ));
    };
    let fields = KeyValueArgs::parse(rest, &["date", "amount", "type", "category", "note"])?;
    if fields.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change. Provide at least one of date=, amount=, type=, category=, note="
                .into(),
        ));
    }
    let amount = fields.get("amount").map(parse_amount).transpose()?;
    let id = (*id).to_string();
    let ledger = context.require_ledger_mut()?;
    let transaction = TransactionService::update(
        ledger,
        &id,
        fields.get("date"),
        amount,
        fields.get("type"),
        fields.get("category"),
        fields.get("note"),
    )?;
    io::print_success(format!("Transaction '{}' updated.", transaction.id));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: transaction remove <id>".into(),
        ));
    };
    let id = (*id).to_string();
    if !context.confirm(&format!("Delete transaction '{}'?", id))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let ledger = context.require_ledger_mut()?;
    TransactionService::delete(ledger, &id)?;
    io::print_success(format!("Transaction '{}' deleted.", id));
    Ok(())
}
