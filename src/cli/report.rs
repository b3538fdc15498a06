//! Report formatting and printing utilities.
//!
//! Issues are printed in a cargo-like format. Kept apart from the core so
//! the overlay can be used as a library without any terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, InitSummary, ShowSummary,
    show::{ordered_entries, show_json},
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::ResolvedTable;
use crate::issues::{Issue, Report, ReportLocation, Severity};
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print the check success line.
pub fn print_success_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let msg = format!(
        "Loaded {} custom {} for {} {} - no issues found",
        summary.registered,
        plural(summary.registered, "table", "tables"),
        summary.locale_count,
        plural(summary.locale_count, "locale", "locales"),
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Point at `check` when a command hides its load issues.
pub fn print_load_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} load {} (run {} for details)",
            "warning:".bold().yellow(),
            count,
            plural(count, "issue", "issues"),
            "langpatch check".cyan()
        );
    }
}

pub fn print_show_to<W: Write>(summary: &ShowSummary, writer: &mut W) {
    if summary.json {
        let json = serde_json::to_string_pretty(&show_json(summary)).unwrap_or_default();
        let _ = writeln!(writer, "{}", json);
        return;
    }

    let title = format!("{} ({})", summary.table.bold(), summary.locale);
    let table = match &summary.resolved {
        ResolvedTable::Override(table) => table,
        ResolvedTable::TableNotOverridden => {
            let _ = writeln!(
                writer,
                "{} {}: locale is overridden but this table is not; host data is used",
                "-".dimmed(),
                title
            );
            return;
        }
        ResolvedTable::NoOverride => {
            let _ = writeln!(
                writer,
                "{} {}: no custom language for this locale; host data is used",
                "-".dimmed(),
                title
            );
            return;
        }
    };

    let entries = ordered_entries(table);
    let culture = summary.culture.as_deref().unwrap_or("none");
    let _ = writeln!(
        writer,
        "{} {} overridden, culture {}, {} {}",
        SUCCESS_MARK.green(),
        title,
        culture.cyan(),
        entries.len(),
        plural(entries.len(), "entry", "entries")
    );

    let key_width = entries
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(*key))
        .max()
        .unwrap_or(0);
    for (key, value) in entries {
        let padding = key_width - UnicodeWidthStr::width(key);
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {}",
            key.blue(),
            "",
            value,
            padding = padding
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let location = match issue.location() {
        ReportLocation::File { path } => path.to_string(),
        ReportLocation::Table { table } => format!("table '{}'", table),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem", "problems"),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn location_key<'a>(location: &ReportLocation<'a>) -> (u8, &'a str) {
    match *location {
        ReportLocation::Table { table } => (0, table),
        ReportLocation::File { path } => (1, path),
    }
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    location_key(&a.location())
        .cmp(&location_key(&b.location()))
        .then_with(|| a.cmp(b))
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success_to(summary, &mut io::stdout().lock());
            }
        }
        CommandSummary::Show(summary) => {
            if verbose {
                report_to(&result.issues, &mut io::stderr().lock());
            } else {
                print_load_warning_to(result.issues.len(), &mut io::stderr().lock());
            }
            print_show_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Tests
// ============================================================
