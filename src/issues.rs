//! Issue types for load and check results.
//!
//! Per-file problems never abort a load. They are collected as issues so the
//! caller can log or display them:
//! - Load issues come from `core::overlay` (naming, reading, locale, host)
//! - Key issues come from `core::analysis` (override vs. shared key sets)

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DirectoryMissing,
    NotADirectory,
    InvalidPattern,
    InvalidSourceName,
    ReadError,
    LocaleNotFound,
    SnapshotUnavailable,
    UnknownKey,
    MissingKey,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::DirectoryMissing => write!(f, "directory-missing"),
            Rule::NotADirectory => write!(f, "not-a-directory"),
            Rule::InvalidPattern => write!(f, "invalid-pattern"),
            Rule::InvalidSourceName => write!(f, "invalid-source-name"),
            Rule::ReadError => write!(f, "read-error"),
            Rule::LocaleNotFound => write!(f, "locale-not-found"),
            Rule::SnapshotUnavailable => write!(f, "snapshot-unavailable"),
            Rule::UnknownKey => write!(f, "unknown-key"),
            Rule::MissingKey => write!(f, "missing-key"),
        }
    }
}

// ============================================================
// Issue Types - Load
// ============================================================

/// The configured load directory does not exist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirectoryMissingIssue {
    pub path: String,
    pub error: String,
}

/// The configured load path exists but is a file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NotADirectoryIssue {
    pub path: String,
    pub error: String,
}

/// The file pattern is not a valid glob, so nothing can be discovered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvalidPatternIssue {
    pub path: String,
    pub pattern: String,
    pub error: String,
}

/// A file name that does not follow `<locale>_<table>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct InvalidSourceNameIssue {
    pub file_path: String,
    pub name: String,
    pub reason: String,
}

/// A file that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// A locale token that matches no known culture. The table is still loaded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocaleNotFoundIssue {
    pub file_path: String,
    pub locale: String,
}

/// Shared metadata for a host table could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnapshotUnavailableIssue {
    pub table: String,
    pub error: String,
}

// ============================================================
// Issue Types - Keys
// ============================================================

/// Override key that the host table does not define.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnknownKeyIssue {
    pub file_path: String,
    pub locale: String,
    pub table: String,
    pub key: String,
}

/// Host key that an override leaves untranslated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingKeyIssue {
    pub file_path: String,
    pub locale: String,
    pub table: String,
    pub key: String,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Issue {
    DirectoryMissing(DirectoryMissingIssue),
    NotADirectory(NotADirectoryIssue),
    InvalidPattern(InvalidPatternIssue),
    InvalidSourceName(InvalidSourceNameIssue),
    ReadError(ReadErrorIssue),
    LocaleNotFound(LocaleNotFoundIssue),
    SnapshotUnavailable(SnapshotUnavailableIssue),
    UnknownKey(UnknownKeyIssue),
    MissingKey(MissingKeyIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Where an issue points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLocation<'a> {
    /// A source file or directory.
    File { path: &'a str },
    /// A host table, not tied to a file.
    Table { table: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for DirectoryMissingIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::DirectoryMissing
    }

    fn hint(&self) -> Option<&str> {
        Some("check the 'loadPath' setting in .langpatchrc.json")
    }
}

impl Report for NotADirectoryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::NotADirectory
    }

    fn hint(&self) -> Option<&str> {
        Some("point 'loadPath' at the directory holding the tables")
    }
}

impl Report for InvalidPatternIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::InvalidPattern
    }

    fn hint(&self) -> Option<&str> {
        Some("check the 'filePattern' setting in .langpatchrc.json")
    }
}

impl Report for InvalidSourceNameIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("'{}': {}", self.name, self.reason)
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::InvalidSourceName
    }

    fn hint(&self) -> Option<&str> {
        Some("rename the file to <locale>_<table>, e.g. en-US_UIStrings.csv")
    }
}

impl Report for ReadErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::ReadError
    }
}

impl Report for LocaleNotFoundIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("'{}' is not a known locale code or language name", self.locale)
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::LocaleNotFound
    }

    fn hint(&self) -> Option<&str> {
        Some("the table is loaded without culture-aware formatting")
    }
}

impl Report for SnapshotUnavailableIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Table { table: &self.table }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::SnapshotUnavailable
    }

    fn hint(&self) -> Option<&str> {
        Some("overrides for this table fall back to the default tables")
    }
}

impl Report for UnknownKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!(
            "'{}' is not defined in table '{}' ({})",
            self.key, self.table, self.locale
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::UnknownKey
    }
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!(
            "'{}' from table '{}' has no translation ({})",
            self.key, self.table, self.locale
        )
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingKey
    }
}
