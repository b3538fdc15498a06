//! The overlay context: settings, host, and registry behind one owner.
//!
//! A load cycle runs in two phases:
//! 1. Discovery and reading, through a [`ReadExecutor`]. This is the only
//!    phase that may run concurrently.
//! 2. Name resolution, parsing, locale resolution, registration, and the
//!    host snapshot fetch, strictly in discovery order.
//!
//! Loads never fail as a whole. Anything that goes wrong for a single file
//! or table is recorded in the [`LoadReport`] and logged, and the worst
//! outcome is an `Empty` registry that overrides nothing.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use super::{
    error::{LoadError, OverlayError},
    host::LocalizationHost,
    loader::{ParallelReader, ReadExecutor, SourceItem, TokioReader, load_sources},
    locale::{BuiltinCatalog, LocaleCatalog, LocaleIdentity},
    parsers::{BuiltinParser, TableParser},
    registry::{Registry, RegistryState, ResolvedTable, TableKind, build_language},
    source_name::{SourceNameResolver, UnderscoreSourceName},
};
use crate::issues::{
    DirectoryMissingIssue, InvalidPatternIssue, InvalidSourceNameIssue, Issue,
    LocaleNotFoundIssue, NotADirectoryIssue, ReadErrorIssue, SnapshotUnavailableIssue,
};

pub const DEFAULT_FILE_PATTERN: &str = "*.csv";
pub const DEFAULT_LOAD_PATH: &str = "./lang";

/// Swappable strategies and paths used by a load cycle.
pub struct Settings {
    pub file_pattern: String,
    pub load_path: PathBuf,
    pub name_resolver: Box<dyn SourceNameResolver + Send + Sync>,
    pub parser: Box<dyn TableParser + Send + Sync>,
    pub catalog: Box<dyn LocaleCatalog + Send + Sync>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            load_path: PathBuf::from(DEFAULT_LOAD_PATH),
            name_resolver: Box::new(UnderscoreSourceName::default()),
            parser: Box::new(BuiltinParser::default()),
            catalog: Box::new(BuiltinCatalog::default()),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("file_pattern", &self.file_pattern)
            .field("load_path", &self.load_path)
            .finish_non_exhaustive()
    }
}

impl Settings {
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    pub fn with_load_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_path = path.into();
        self
    }

    pub fn with_parser(mut self, parser: impl TableParser + Send + Sync + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub fn with_name_resolver(
        mut self,
        resolver: impl SourceNameResolver + Send + Sync + 'static,
    ) -> Self {
        self.name_resolver = Box::new(resolver);
        self
    }

    pub fn with_catalog(mut self, catalog: impl LocaleCatalog + Send + Sync + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }
}

/// Outcome of one load cycle.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Source files read successfully.
    pub files_read: usize,
    /// Custom languages registered.
    pub registered: usize,
    pub issues: Vec<Issue>,
}

/// Custom-language overlay over a host localization framework.
///
/// Callers must not run `setup*`, `reload*`, or `release` concurrently on one
/// overlay; every such method takes `&mut self`.
pub struct Overlay<H: LocalizationHost> {
    settings: Settings,
    host: H,
    registry: Registry,
    /// Locales this overlay added to the host, withdrawn on release.
    announced: Vec<LocaleIdentity>,
}

impl<H: LocalizationHost> Overlay<H> {
    pub fn new(settings: Settings, host: H) -> Self {
        Self {
            settings,
            host,
            registry: Registry::new(),
            announced: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn state(&self) -> RegistryState {
        self.registry.state()
    }

    /// Load from the configured path, blocking until done.
    ///
    /// Builds a private current-thread runtime. Inside an async context it
    /// fails with [`OverlayError::InsideRuntime`] without touching any state;
    /// use [`Overlay::setup_async`] there.
    pub fn setup(&mut self) -> Result<LoadReport, OverlayError> {
        let path = self.settings.load_path.clone();
        self.setup_from(&path)
    }

    pub fn setup_from(&mut self, path: &Path) -> Result<LoadReport, OverlayError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(OverlayError::InsideRuntime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(runtime.block_on(self.load_from(path, &ParallelReader)))
    }

    /// Load from the configured path, reading files as concurrent tokio tasks.
    pub async fn setup_async(&mut self) -> LoadReport {
        let path = self.settings.load_path.clone();
        self.setup_async_from(&path).await
    }

    pub async fn setup_async_from(&mut self, path: &Path) -> LoadReport {
        self.load_from(path, &TokioReader).await
    }

    pub fn reload(&mut self) -> Result<LoadReport, OverlayError> {
        self.release();
        self.setup()
    }

    pub async fn reload_async(&mut self) -> LoadReport {
        self.release();
        self.setup_async().await
    }

    /// Drop every loaded language, withdraw its locales and detach from the
    /// host. Idempotent.
    pub fn release(&mut self) {
        self.host.detach_provider();
        self.withdraw_locales();
        self.registry.release();
    }

    /// Discover and read sources under `path` with `executor`, then load them.
    pub async fn load_from<E: ReadExecutor>(&mut self, path: &Path, executor: &E) -> LoadReport {
        self.begin_load();

        let batch = match load_sources(path, &self.settings.file_pattern, executor).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("nothing loaded: {}", e);
                self.registry.finish_load();
                return LoadReport {
                    issues: vec![load_path_issue(path, e)],
                    ..LoadReport::default()
                };
            }
        };

        let mut report = LoadReport::default();
        for failure in batch.failures {
            warn!("{}", failure);
            let file_path = match &failure {
                LoadError::Read { path, .. }
                | LoadError::TaskFailed { path, .. } => path.clone(),
                _ => path.to_path_buf(),
            };
            report.issues.push(Issue::ReadError(ReadErrorIssue {
                file_path: file_path.to_string_lossy().to_string(),
                error: failure.to_string(),
            }));
        }

        self.register_items(batch.items, &mut report).await;
        report
    }

    /// Load already-read source items, replacing any previous load.
    pub async fn load(&mut self, items: Vec<SourceItem>) -> LoadReport {
        self.begin_load();
        let mut report = LoadReport::default();
        self.register_items(items, &mut report).await;
        report
    }

    /// Which content serves `table` for `locale`.
    pub fn lookup(&self, table: &str, locale: &str) -> ResolvedTable {
        self.registry.lookup(table, locale)
    }

    pub fn provide(&self, kind: TableKind, table: &str, locale: &str) -> ResolvedTable {
        self.registry.provide(kind, table, locale)
    }

    /// Culture code to format values for `locale`, when it is overridden.
    pub fn culture_for(&self, locale: &str) -> Option<&str> {
        self.registry.culture_for(locale)
    }

    fn begin_load(&mut self) {
        self.host.detach_provider();
        self.withdraw_locales();
        self.registry.begin_load();
    }

    fn withdraw_locales(&mut self) {
        for identity in self.announced.drain(..) {
            self.host.remove_locale(&identity);
        }
    }

    async fn register_items(&mut self, items: Vec<SourceItem>, report: &mut LoadReport) {
        report.files_read += items.len();

        for item in items {
            let built = build_language(
                &item.name,
                &item.content,
                &item.path,
                self.settings.name_resolver.as_ref(),
                self.settings.parser.as_ref(),
                self.settings.catalog.as_ref(),
            );
            let built = match built {
                Ok(built) => built,
                Err(e) => {
                    warn!("skipping {}: {}", item.path.display(), e);
                    report
                        .issues
                        .push(Issue::InvalidSourceName(InvalidSourceNameIssue {
                            file_path: item.path.to_string_lossy().to_string(),
                            name: e.name,
                            reason: e.reason.to_string(),
                        }));
                    continue;
                }
            };

            if let Some(e) = built.locale_not_found {
                warn!("{} ({}): loading as an opaque locale", e, item.path.display());
                report.issues.push(Issue::LocaleNotFound(LocaleNotFoundIssue {
                    file_path: item.path.to_string_lossy().to_string(),
                    locale: e.token,
                }));
            }

            if self.host.add_locale(built.language.locale()) {
                self.announced.push(built.language.locale().clone());
            }
            self.registry.register(built.language);
            report.registered += 1;
        }

        if self.registry.is_empty() {
            self.registry.finish_load();
            info!("no custom languages registered");
            return;
        }

        self.cache_shared_tables(report).await;
        self.host.attach_provider();
        self.registry.finish_load();
        info!(
            "loaded {} custom {} across {} locale(s), {} shared table(s) cached",
            report.registered,
            crate::utils::plural(report.registered, "table", "tables"),
            self.registry.locales().len(),
            self.registry.cached_table_count()
        );
    }

    async fn cache_shared_tables(&mut self, report: &mut LoadReport) {
        let default_locale = self.host.default_locale();
        for table in self.host.table_names(&default_locale) {
            match self.host.shared_table_data(&table, &default_locale).await {
                Ok(data) => self.registry.cache_shared(data),
                Err(e) => {
                    warn!("no shared data for table '{}': {}", table, e);
                    report
                        .issues
                        .push(Issue::SnapshotUnavailable(SnapshotUnavailableIssue {
                            table,
                            error: e.to_string(),
                        }));
                }
            }
        }
    }
}

/// Issue for a load that stopped before reading any file.
fn load_path_issue(path: &Path, error: LoadError) -> Issue {
    let path = path.to_string_lossy().to_string();
    match error {
        LoadError::NotADirectory(_) => Issue::NotADirectory(NotADirectoryIssue {
            path,
            error: error.to_string(),
        }),
        LoadError::InvalidPattern { ref pattern, .. } => {
            Issue::InvalidPattern(InvalidPatternIssue {
                path,
                pattern: pattern.clone(),
                error: error.to_string(),
            })
        }
        LoadError::DirectoryMissing(_) => Issue::DirectoryMissing(DirectoryMissingIssue {
            path,
            error: error.to_string(),
        }),
        LoadError::Read { .. } | LoadError::TaskFailed { .. } => {
            Issue::ReadError(ReadErrorIssue {
                file_path: path,
                error: error.to_string(),
            })
        }
    }
}
