//! Account CRUD commands.

use crate::cli::commands::KeyValueArgs;
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};
use crate::core::services::AccountService;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::protected(
        "account",
        "Manage accounts in the open ledger",
        "account <add <id> <name> [currency]|list|show <id>|edit <id> key=value...|remove <id>>",
        cmd_account,
    )]
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: account <add|list|show|edit|remove>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "add" | "create" => handle_add(context, rest),
        "list" | "ls" => handle_list(context),
        "show" => handle_show(context, rest),
        "edit" | "update" => handle_edit(context, rest),
        "remove" | "delete" => handle_remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown account subcommand `{}`. Available: add, list, show, edit, remove",
            other
        ))),
    }
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, name, currency) = match args {
        [id, name] => (*id, *name, context.config.currency.clone()),
        [id, name, currency] => (*id, *name, (*currency).to_string()),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: account add <id> <name> [currency]".into(),
            ))
        }
    };
    let ledger = context.require_ledger_mut()?;
    let account = AccountService::create(ledger, id, name, &currency)?;
    io::print_success(format!("Account '{}' created.", account.id));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let ledger = context.require_ledger()?;
    let accounts = AccountService::list(ledger);
    if accounts.is_empty() {
        io::print_info("No accounts yet. Use `account add <id> <name>`.");
        return Ok(());
    }
    output::section(format!("Accounts ({})", accounts.len()));
    for account in accounts {
        output::payload(format!("  {}", account.display_label()));
    }
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: account show <id>".into(),
        ));
    };
    let ledger = context.require_ledger()?;
    let account = AccountService::get(ledger, id)?;
    output::payload(serde_json::to_string_pretty(account)?);
    Ok(())
}

fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: account edit <id> [name=...] [currency=...]".into(),
        ));
    };
    let fields = KeyValueArgs::parse(rest, &["name", "currency"])?;
    if fields.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change. Provide at least one of name=, currency=".into(),
        ));
    }
    let id = (*id).to_string();
    let ledger = context.require_ledger_mut()?;
    let account = AccountService::update(ledger, &id, fields.get("name"), fields.get("currency"))?;
    io::print_success(format!("Account '{}' updated.", account.id));
    Ok(())
}

fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: account remove <id>".into(),
        ));
    };
    let id = (*id).to_string();
    let prompt = format!(
        "Delete account '{}'? Its transactions and income records go with it.",
        id
    );
    if !context.confirm(&prompt)? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let ledger = context.require_ledger_mut()?;
    AccountService::delete(ledger, &id)?;
    io::print_success(format!("Account '{}' deleted.", id));
    Ok(())
}
