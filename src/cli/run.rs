//! Dispatch a parsed command to its handler.
//!
//! # Returns
//! - `Ok(CommandResult)` with issues and error/warning counts
//! - `Err` if the command cannot run (unreadable config, bad flags, I/O)
use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init, show::show},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Show(cmd)) => show(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
