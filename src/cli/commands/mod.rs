pub mod account;
pub mod config;
pub mod forecast;
pub mod income;
pub mod ledger;
pub mod session;
pub mod stats;
pub mod system;
pub mod transaction;

use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::state::CommandError;

const ROOT_COMMAND_ORDER: &[&str] = &[
    "ledger",
    "session",
    "account",
    "transaction",
    "income",
    "stats",
    "forecast",
    "config",
    "help",
    "version",
    "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(ledger::definitions());
    commands.extend(session::definitions());
    commands.extend(account::definitions());
    commands.extend(transaction::definitions());
    commands.extend(income::definitions());
    commands.extend(stats::definitions());
    commands.extend(forecast::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

/// `key=value` arguments shared by list/edit handlers.
#[derive(Debug)]
pub(crate) struct KeyValueArgs<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> KeyValueArgs<'a> {
    pub(crate) fn parse(args: &[&'a str], allowed: &[&str]) -> Result<Self, CommandError> {
        let mut pairs = Vec::with_capacity(args.len());
        for arg in args {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                CommandError::InvalidArguments(format!("expected key=value, got `{}`", arg))
            })?;
            if !allowed.contains(&key) {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown key `{}`. Available: {}",
                    key,
                    allowed.join(", ")
                )));
            }
            pairs.push((key, value));
        }
        Ok(Self { pairs })
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_args_reject_unknown_keys() {
        let err = KeyValueArgs::parse(&["colour=red"], &["from", "to"]).unwrap_err();
        assert!(err.to_string().contains("unknown key `colour`"));
    }

    #[test]
    fn key_value_args_find_values_by_key() {
        let parsed = KeyValueArgs::parse(&["from=2024-01-01", "type=expense"], &["from", "type"])
            .unwrap();
        assert_eq!(parsed.get("from"), Some("2024-01-01"));
        assert_eq!(parsed.get("type"), Some("expense"));
        assert_eq!(parsed.get("to"), None);
    }

    #[test]
    fn amounts_must_be_numeric() {
        assert!(parse_amount("12.5").is_ok());
        assert!(parse_amount("lots").is_err());
    }
}
