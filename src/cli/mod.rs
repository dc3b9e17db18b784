//! Interactive shell and script-mode command layer.

pub mod commands;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod shell;
pub mod state;

pub use shell::run_cli;
pub use state::{CliMode, CommandError, CommandResult, ShellContext};
