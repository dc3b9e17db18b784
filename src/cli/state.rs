//! Shell runtime state, dispatch, and command error types.

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::services::SessionService;
use crate::core::LedgerManager;
use crate::errors::{CliError, FinanceError};
use crate::ledger::Ledger;
use crate::storage::JsonStorage;

use super::commands;
use super::io as cli_io;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No ledger loaded. Use `ledger new` or `ledger open` first.")]
    LedgerNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub session_token: Option<String>,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let storage = JsonStorage::new_default()?;
        let manager = LedgerManager::new(Box::new(storage));
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;

        let mut context = ShellContext {
            mode,
            registry,
            manager,
            config_manager,
            config,
            session_token: None,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.auto_load_last()?;
        Ok(context)
    }

    /// Interactive sessions resume the ledger that was open last time.
    fn auto_load_last(&mut self) -> Result<(), CliError> {
        if self.mode != CliMode::Interactive || self.manager.current.is_some() {
            return Ok(());
        }
        let Some(name) = self.manager.last_opened()? else {
            return Ok(());
        };
        if self.manager.open(&name).is_ok() {
            cli_io::print_success(format!("Automatically loaded last ledger `{}`.", name));
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        match self.manager.current_name() {
            Some(name) => format!("finance [{}]> ", name),
            None => "finance> ".to_string(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let (protected, handler) = (entry.protected, entry.handler);
        if protected {
            self.require_session()?;
        }
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    /// Destructive commands ask before acting; script runs never block on
    /// a prompt and proceed.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::LedgerNotLoaded => {
                cli_io::print_error("No ledger loaded. Use `ledger new` or `ledger open` first.");
                cli_io::print_info("Try `ledger new Demo` to get started.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub fn require_ledger(&self) -> Result<&Ledger, CommandError> {
        self.manager
            .current
            .as_ref()
            .ok_or(CommandError::LedgerNotLoaded)
    }

    pub fn require_ledger_mut(&mut self) -> Result<&mut Ledger, CommandError> {
        self.manager
            .current
            .as_mut()
            .ok_or(CommandError::LedgerNotLoaded)
    }

    /// Gate shared by every protected command: the stored token must match
    /// a logged-in user of the open ledger.
    pub fn require_session(&self) -> Result<(), CommandError> {
        let ledger = self.require_ledger()?;
        SessionService::require(ledger, self.session_token.as_deref())?;
        Ok(())
    }

    pub fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_context(temp: &TempDir) -> ShellContext {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();
        let config_manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = config_manager.load().unwrap();
        ShellContext {
            mode: CliMode::Script,
            registry,
            manager: LedgerManager::new(Box::new(storage)),
            config_manager,
            config,
            session_token: None,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            context.process_line(line).unwrap();
        }
    }

    #[test]
    fn script_flow_creates_and_populates_a_ledger() {
        let temp = TempDir::new().unwrap();
        let mut context = test_context(&temp);
        run(
            &mut context,
            &[
                "ledger new Demo",
                "session register alice hunter2",
                "session login alice hunter2",
                "account add ACC001 Checking USD",
            ],
        );

        let ledger = context.require_ledger().unwrap();
        assert!(ledger.account("ACC001").is_some());
        assert!(context.session_token.is_some());
    }

    #[test]
    fn protected_commands_are_rejected_without_a_login() {
        let temp = TempDir::new().unwrap();
        let mut context = test_context(&temp);
        run(&mut context, &["ledger new Demo"]);

        let err = context
            .process_line("account add ACC001 Checking USD")
            .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized. Please login first.");
    }

    #[test]
    fn protected_commands_need_a_ledger_before_a_session() {
        let temp = TempDir::new().unwrap();
        let mut context = test_context(&temp);
        let err = context.process_line("stats summary").unwrap_err();
        assert!(matches!(err, CommandError::LedgerNotLoaded));
    }

    #[test]
    fn exit_breaks_the_loop() {
        let temp = TempDir::new().unwrap();
        let mut context = test_context(&temp);
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn unknown_commands_do_not_abort_the_session() {
        let temp = TempDir::new().unwrap();
        let mut context = test_context(&temp);
        assert_eq!(
            context.process_line("legder new Demo").unwrap(),
            LoopControl::Continue
        );
    }
}
