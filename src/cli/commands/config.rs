//! Global CLI preference commands.

use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::cli::{io, output};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage global CLI preferences",
        "config [show|set <key> <value>|backup [note]|backups|restore <name>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return handle_show(context);
    }

    match args[0].to_ascii_lowercase().as_str() {
        "set" => handle_set(context, &args[1..]),
        "backup" => handle_backup(context, &args[1..]),
        "backups" | "list-backups" => handle_list_backups(context),
        "restore" => handle_restore(context, &args[1..]),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`. Available: show, set, backup, backups, restore",
            other
        ))),
    }
}

fn handle_show(context: &mut ShellContext) -> CommandResult {
    output::section("Configuration");
    output::payload(serde_json::to_string_pretty(&context.config)?);
    Ok(())
}

fn handle_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key, value] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: config set <locale|currency|forecast_months> <value>".into(),
        ));
    };

    match key.to_ascii_lowercase().as_str() {
        "locale" => context.config.locale = (*value).to_string(),
        "currency" => context.config.currency = (*value).to_string(),
        "forecast_months" | "forecast-months" => {
            let months = value.parse::<u32>().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid months value `{}`", value))
            })?;
            if !(1..=12).contains(&months) {
                return Err(CommandError::InvalidArguments(
                    "months must be between 1 and 12".into(),
                ));
            }
            context.config.default_forecast_months = months;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`. Available: locale, currency, forecast_months",
                other
            )))
        }
    }
    context.persist_config()?;
    io::print_success(format!("Configuration updated: {}.", key));
    Ok(())
}

fn handle_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let name = context.config_manager.backup(&context.config, note.as_deref())?;
    io::print_success(format!("Configuration backup '{}' written.", name));
    Ok(())
}

fn handle_list_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups yet.");
        return Ok(());
    }
    output::section(format!("Configuration backups ({})", backups.len()));
    for name in backups {
        output::payload(format!("  {}", name));
    }
    Ok(())
}

fn handle_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: config restore <name>".into(),
        ));
    };
    let restored = context.config_manager.restore(name)?;
    context.config = restored;
    context.persist_config()?;
    io::print_success(format!("Configuration '{}' restored.", name));
    Ok(())
}
