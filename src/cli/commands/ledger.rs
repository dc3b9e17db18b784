//! Ledger lifecycle commands: create, open, save, backup, restore, seed.

use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CliMode, CommandError, CommandResult, ShellContext};
use crate::core::services::SeedService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "ledger",
        "Ledger operations (new, open, save, backup, restore, seed...)",
        "ledger <new|open|save [name]|backup [note]|backups|restore <backup>|list|seed>",
        cmd_ledger,
    )]
}

fn cmd_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: ledger <new|open|save|backup|backups|restore|list|seed>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "new" => handle_new(context, rest),
        "open" | "load" => handle_open(context, rest),
        "save" => handle_save(context, rest),
        "backup" => handle_backup(context, rest),
        "backups" | "list-backups" => handle_list_backups(context),
        "restore" => handle_restore(context, rest),
        "list" => handle_list(context),
        "seed" => handle_seed(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown ledger subcommand `{}`. Available: new, open, save, backup, backups, restore, list, seed",
            other
        ))),
    }
}

fn name_from(context: &mut ShellContext, args: &[&str], usage: &str) -> Result<String, CommandError> {
    let name = if let Some(name) = args.first() {
        (*name).to_string()
    } else if context.mode == CliMode::Interactive {
        io::prompt_text(&context.theme, "Ledger name")?
    } else {
        return Err(CommandError::InvalidArguments(usage.into()));
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CommandError::InvalidArguments(
            "Ledger name cannot be empty".into(),
        ));
    }
    Ok(name)
}

fn handle_new(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = name_from(context, args, "usage: ledger new <name>")?;
    let path = context.manager.create(&name)?;
    context.session_token = None;
    io::print_success(format!("Ledger '{}' created at {}.", name, path.display()));
    Ok(())
}

fn handle_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = name_from(context, args, "usage: ledger open <name>")?;
    context.manager.open(&name)?;
    context.session_token = None;
    io::print_success(format!("Ledger '{}' opened.", name));
    Ok(())
}

fn handle_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_ledger()?;
    let path = match args.first() {
        Some(name) => context.manager.save_as(name)?,
        None => context.manager.save()?,
    };
    io::print_success(format!("Ledger saved to {}.", path.display()));
    Ok(())
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_ledger()?;
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let path = context.manager.backup(note.as_deref())?;
    io::print_success(format!("Backup written to {}.", path.display()));
    Ok(())
}

fn handle_list_backups(context: &mut ShellContext) -> CommandResult {
    context.require_ledger()?;
    let backups = context.manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(());
    }
    for backup in backups {
        io::print_info(format!("  {}", backup));
    }
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_ledger()?;
    let Some(backup_name) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: ledger restore <backup>".into(),
        ));
    };
    let prompt = format!("Replace the open ledger with backup `{}`?", backup_name);
    if !context.confirm(&prompt)? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    context.manager.restore_backup(backup_name)?;
    context.session_token = None;
    io::print_success(format!("Backup '{}' restored.", backup_name));
    Ok(())
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let ledgers = context.manager.list_ledgers()?;
    if ledgers.is_empty() {
        io::print_info("No ledgers found.");
        return Ok(());
    }
    for ledger in ledgers {
        io::print_info(format!("  {}", ledger));
    }
    Ok(())
}

fn handle_seed(context: &mut ShellContext) -> CommandResult {
    let ledger = context.require_ledger_mut()?;
    if ledger.accounts.is_empty() {
        io::print_info("No data found. Seeding sample data...");
    }
    let report = SeedService::seed_demo(ledger)?;
    if report.accounts == 0 && report.transactions == 0 && report.income_records == 0 {
        io::print_info("Sample data already present.");
    } else {
        io::print_success(format!(
            "Seeded {} accounts, {} transactions, {} income records.",
            report.accounts, report.transactions, report.income_records
        ));
    }
    Ok(())
}
