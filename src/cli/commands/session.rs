//! Registration, login, and session-token commands.

use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::state::{CommandError, CommandResult, ShellContext};
use crate::core::services::SessionService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "session",
        "Register, login, and manage the active session",
        "session <register <user> <pass>|login <user> <pass>|logout|status>",
        cmd_session,
    )]
}

fn cmd_session(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: session <register|login|logout|status>".into(),
        ));
    };

    match subcommand.to_ascii_lowercase().as_str() {
        "register" => handle_register(context, rest),
        "login" => handle_login(context, rest),
        "logout" => handle_logout(context),
        "status" | "whoami" => handle_status(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown session subcommand `{}`. Available: register, login, logout, status",
            other
        ))),
    }
}

fn credentials<'a>(args: &[&'a str], usage: &str) -> Result<(&'a str, &'a str), CommandError> {
    match args {
        [username, password] => Ok((*username, *password)),
        _ => Err(CommandError::InvalidArguments(usage.into())),
    }
}

fn handle_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (username, password) = credentials(args, "usage: session register <user> <pass>")?;
    let ledger = context.require_ledger_mut()?;
    let user = SessionService::register(ledger, username, password)?;
    io::print_success(format!("User '{}' created successfully.", user.username));
    Ok(())
}

fn handle_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (username, password) = credentials(args, "usage: session login <user> <pass>")?;
    let ledger = context.require_ledger_mut()?;
    let token = SessionService::login(ledger, username, password)?;
    context.session_token = Some(token);
    io::print_success(format!("Login successful. Welcome, {}!", username));
    Ok(())
}

fn handle_logout(context: &mut ShellContext) -> CommandResult {
    let token = context.session_token.clone().unwrap_or_default();
    let ledger = context.require_ledger_mut()?;
    SessionService::logout(ledger, &token)?;
    context.session_token = None;
    io::print_success("Logged out successfully.");
    Ok(())
}

fn handle_status(context: &mut ShellContext) -> CommandResult {
    let ledger = context.require_ledger()?;
    match SessionService::require(ledger, context.session_token.as_deref()) {
        Ok(user) => io::print_info(format!("Logged in as '{}'.", user.username)),
        Err(_) => io::print_info("Not logged in."),
    }
    Ok(())
}
