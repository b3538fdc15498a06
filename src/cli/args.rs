//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Load every translation file and report load and key issues
//! - `show`: Print the table served for one (table, locale) pair
//! - `init`: Write a default `.langpatchrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::TableFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Show(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by loading commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory holding translation files (overrides config file)
    #[arg(long, env = "LANGPATCH_LOAD_PATH")]
    pub load_path: Option<PathBuf>,

    /// Glob matched against file names (overrides config file)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Table text format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<TableFormat>,

    /// Locale of the base tables (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Table name, e.g. UIStrings
    pub table: String,

    /// Locale token as written in the file name, e.g. en-US
    pub locale: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load translation files and report problems (bad names, unknown locales, key drift)
    Check(CheckCommand),
    /// Show which content serves a table for a locale
    Show(ShowCommand),
    /// Initialize a new .langpatchrc.json configuration file
    Init,
}
