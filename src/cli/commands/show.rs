use anyhow::Result;
use serde_json::{Map, Value, json};

use super::super::args::ShowCommand;
use super::{
    helper::{finish, load_overlay},
    {CommandResult, CommandSummary, ShowSummary},
};
use crate::core::{ResolvedTable, registry::StringTable};

pub fn show(cmd: ShowCommand) -> Result<CommandResult> {
    let (overlay, report) = load_overlay(&cmd.common)?;

    let summary = ShowSummary {
        resolved: overlay.lookup(&cmd.table, &cmd.locale),
        culture: overlay.culture_for(&cmd.locale).map(str::to_string),
        table: cmd.table,
        locale: cmd.locale,
        json: cmd.json,
    };

    Ok(finish(CommandSummary::Show(summary), report.issues, false))
}

/// Entries in host key order, then keys the host does not define, sorted.
pub fn ordered_entries(table: &StringTable) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = table
        .shared
        .keys
        .iter()
        .filter_map(|k| table.get(&k.key).map(|v| (k.key.as_str(), v)))
        .collect();

    let mut extra: Vec<(&str, &str)> = table
        .entries
        .iter()
        .filter(|(key, _)| !table.shared.contains_key(key))
        .collect();
    extra.sort_unstable();

    entries.extend(extra);
    entries
}

pub fn status_name(resolved: &ResolvedTable) -> &'static str {
    match resolved {
        ResolvedTable::Override(_) => "override",
        ResolvedTable::TableNotOverridden => "table-not-overridden",
        ResolvedTable::NoOverride => "no-override",
    }
}

pub fn show_json(summary: &ShowSummary) -> Value {
    let mut value = json!({
        "table": summary.table,
        "locale": summary.locale,
        "status": status_name(&summary.resolved),
        "culture": summary.culture,
    });

    if let (ResolvedTable::Override(table), Value::Object(object)) =
        (&summary.resolved, &mut value)
    {
        let entries: Map<String, Value> = ordered_entries(table)
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        object.insert("entries".to_string(), Value::Object(entries));
    }

    value
}
