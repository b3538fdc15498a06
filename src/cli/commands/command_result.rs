use crate::core::ResolvedTable;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Show(ShowSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub files_read: usize,
    pub registered: usize,
    pub locale_count: usize,
}

#[derive(Debug)]
pub struct ShowSummary {
    pub table: String,
    pub locale: String,
    pub resolved: ResolvedTable,
    /// Culture used to format values for the locale, if overridden.
    pub culture: Option<String>,
    pub json: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running langpatch commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found while loading and analyzing.
    pub issues: Vec<Issue>,
}
