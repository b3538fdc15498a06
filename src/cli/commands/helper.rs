//! Shared plumbing for the loading commands.
//!
//! Merges config file values with CLI flags, builds the host from the base
//! tables, and runs one overlay load.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::{debug, warn};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::{ConfigLoadResult, TableFormat, load_config},
    core::{
        LoadReport, MemoryHost, Overlay, Settings,
        loader::{discover_sources, read_source},
        registry::build_language,
    },
    issues::{Issue, Severity},
    utils::eq_ignore_case,
};

/// Effective load options after applying CLI overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub load_path: PathBuf,
    pub file_pattern: String,
    pub format: TableFormat,
    pub default_locale: String,
    pub base_root: Option<PathBuf>,
}

impl LoadOptions {
    pub fn resolve(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the working directory")?;
        Self::resolve_in(&cwd, common)
    }

    /// Resolve options using the config file found from `dir`.
    pub fn resolve_in(dir: &Path, common: &CommonArgs) -> Result<Self> {
        let ConfigLoadResult { config, from_file } = load_config(dir)?;
        debug!(
            "using {} configuration",
            if from_file { "file" } else { "default" }
        );

        let file_pattern = common.pattern.clone().unwrap_or(config.file_pattern);
        Pattern::new(&file_pattern)
            .with_context(|| format!("Invalid glob pattern in '--pattern': \"{}\"", file_pattern))?;

        Ok(Self {
            load_path: common
                .load_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(config.load_path)),
            file_pattern,
            format: common.format.unwrap_or(config.table_format),
            default_locale: common
                .default_locale
                .clone()
                .unwrap_or(config.default_locale),
            base_root: config.base_root.map(PathBuf::from),
        })
    }

    pub fn settings(&self) -> Settings {
        Settings::default()
            .with_load_path(&self.load_path)
            .with_file_pattern(&self.file_pattern)
            .with_parser(self.format.parser())
    }
}

/// Build an in-memory host whose tables are the default-locale files.
///
/// Base files are read from `baseRoot` when configured, otherwise from the
/// load path. Only files whose locale token matches the default locale
/// count. A missing load path yields a host with no tables; the overlay
/// load reports that directory itself.
pub fn build_host(options: &LoadOptions, settings: &Settings) -> Result<MemoryHost> {
    let base_dir = options.base_root.as_deref().unwrap_or(&options.load_path);

    let paths = match discover_sources(base_dir, &options.file_pattern) {
        Ok(paths) => paths,
        Err(e) if options.base_root.is_some() => {
            return Err(e).context("Failed to read base tables from 'baseRoot'");
        }
        Err(_) => return Ok(MemoryHost::new(&options.default_locale)),
    };

    let mut base = Vec::new();
    for path in paths {
        let item = match read_source(&path) {
            Ok(item) => item,
            Err(e) => {
                warn!("skipping base table: {}", e);
                continue;
            }
        };
        let Ok(built) = build_language(
            &item.name,
            &item.content,
            &item.path,
            settings.name_resolver.as_ref(),
            settings.parser.as_ref(),
            settings.catalog.as_ref(),
        ) else {
            continue;
        };
        if !eq_ignore_case(built.language.locale_token(), &options.default_locale) {
            continue;
        }

        debug!(
            "base table '{}' from {} ({} keys)",
            built.language.table(),
            path.display(),
            built.language.content().len()
        );
        base.push(built.language);
    }

    Ok(MemoryHost::from_tables(
        &options.default_locale,
        base.iter().map(|l| (l.table(), l.content())),
    ))
}

/// Resolve options, build the host, and run a blocking load.
pub fn load_overlay(common: &CommonArgs) -> Result<(Overlay<MemoryHost>, LoadReport)> {
    let options = LoadOptions::resolve(common)?;
    let settings = options.settings();
    let host = build_host(&options, &settings)?;

    let mut overlay = Overlay::new(settings, host);
    let report = overlay.setup()?;
    Ok((overlay, report))
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
    }
}
