//! Source discovery and reading.
//!
//! Discovery walks the load directory recursively and keeps files whose name
//! matches the configured glob. Reading is the only phase that may run
//! concurrently; the strategy is injected through [`ReadExecutor`] so the sync
//! and async setup paths share one load routine. Every executor returns
//! outcomes in discovery order.

use std::{
    fs,
    future::{self, Future},
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern};
use rayon::prelude::*;
use tracing::warn;
use walkdir::WalkDir;

use super::error::LoadError;
use crate::utils::source_stem;

/// A discovered file: its logical name (the file stem) and raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl SourceItem {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            content: content.into(),
        }
    }
}

pub type ReadOutcome = Result<SourceItem, LoadError>;

/// Strategy for reading a batch of discovered files.
pub trait ReadExecutor {
    /// Read every path. The output has one outcome per path, in input order.
    fn read_all(&self, paths: Vec<PathBuf>) -> impl Future<Output = Vec<ReadOutcome>> + Send;
}

/// Reads files one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialReader;

/// Reads files on the rayon thread pool, blocking the caller until done.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelReader;

/// Spawns one blocking tokio task per file and joins them in order.
///
/// Must be awaited inside a tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioReader;

impl ReadExecutor for SequentialReader {
    fn read_all(&self, paths: Vec<PathBuf>) -> impl Future<Output = Vec<ReadOutcome>> + Send {
        future::ready(paths.iter().map(|path| read_source(path)).collect())
    }
}

impl ReadExecutor for ParallelReader {
    fn read_all(&self, paths: Vec<PathBuf>) -> impl Future<Output = Vec<ReadOutcome>> + Send {
        future::ready(paths.par_iter().map(|path| read_source(path)).collect())
    }
}

impl ReadExecutor for TokioReader {
    fn read_all(&self, paths: Vec<PathBuf>) -> impl Future<Output = Vec<ReadOutcome>> + Send {
        async move {
            let tasks: Vec<_> = paths
                .into_iter()
                .map(|path| {
                    let task_path = path.clone();
                    let task = tokio::task::spawn_blocking(move || read_source(&task_path));
                    (path, task)
                })
                .collect();

            let mut outcomes = Vec::with_capacity(tasks.len());
            for (path, task) in tasks {
                let outcome = match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => Err(LoadError::TaskFailed {
                        path,
                        message: e.to_string(),
                    }),
                };
                outcomes.push(outcome);
            }
            outcomes
        }
    }
}

/// Byte order mark that spreadsheet exports put at the start of UTF-8 files.
const UTF8_BOM: char = '\u{feff}';

/// Read one file into a [`SourceItem`] named after its stem.
///
/// A leading byte order mark is dropped.
pub fn read_source(path: &Path) -> ReadOutcome {
    let mut content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.starts_with(UTF8_BOM) {
        content.remove(0);
    }

    Ok(SourceItem {
        name: source_stem(path).unwrap_or_default(),
        path: path.to_path_buf(),
        content,
    })
}

/// List files under `dir` (recursively) whose file name matches `pattern`.
///
/// Entries are sorted by file name within each directory so discovery order
/// is stable across platforms. Unreadable entries are skipped with a warning.
pub fn discover_sources(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.exists() {
        return Err(LoadError::DirectoryMissing(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let pattern = Pattern::new(pattern).map_err(|e| LoadError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| pattern.matches_with(name, options));
        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Read outcomes split into usable items and per-file failures.
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub items: Vec<SourceItem>,
    pub failures: Vec<LoadError>,
}

impl SourceBatch {
    /// Split outcomes, collapsing items that share a name.
    ///
    /// A later item with an already-seen name replaces the earlier content but
    /// keeps the earlier position.
    pub fn from_outcomes(outcomes: Vec<ReadOutcome>) -> Self {
        let mut batch = SourceBatch::default();
        for outcome in outcomes {
            match outcome {
                Ok(item) => batch.push(item),
                Err(e) => batch.failures.push(e),
            }
        }
        batch
    }

    fn push(&mut self, item: SourceItem) {
        match self.items.iter_mut().find(|i| i.name == item.name) {
            Some(existing) => {
                warn!(
                    "{} replaces {} (same source name '{}')",
                    item.path.display(),
                    existing.path.display(),
                    item.name
                );
                *existing = item;
            }
            None => self.items.push(item),
        }
    }
}

/// Discover and read every source under `dir`.
pub async fn load_sources<E: ReadExecutor>(
    dir: &Path,
    pattern: &str,
    executor: &E,
) -> Result<SourceBatch, LoadError> {
    let paths = discover_sources(dir, pattern)?;
    let outcomes = executor.read_all(paths).await;
    Ok(SourceBatch::from_outcomes(outcomes))
}
