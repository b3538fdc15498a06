use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    helper::{finish, load_overlay},
    {CheckSummary, CommandResult, CommandSummary},
};
use crate::core::analysis::key_issues;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let (overlay, report) = load_overlay(&cmd.common)?;

    let mut issues = report.issues;
    issues.extend(key_issues(overlay.registry()));

    let summary = CheckSummary {
        files_read: report.files_read,
        registered: report.registered,
        locale_count: overlay.registry().locales().len(),
    };

    Ok(finish(CommandSummary::Check(summary), issues, true))
}
