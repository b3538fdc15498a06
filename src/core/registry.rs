//! Custom language registry and table provider.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --begin_load--> Loading --finish_load(≥1 entry)--> Ready
//!                                   \----finish_load(0 entries)--> Empty
//! Ready | Empty --release--> Uninitialized
//! ```
//!
//! Starting a load always releases first, so two loads never merge.
//!
//! # Lookup Fallback
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Registry empty or locale unknown | `NoOverride` |
//! | Locale known, table has an entry and cached shared data | `Override` |
//! | Locale known, no entry for the table | `TableNotOverridden` |
//! | Locale known, entry exists but shared data was unavailable | `TableNotOverridden` |
//!
//! A registry belongs to one owner; concurrent `load`/`release` calls are
//! serialized by `&mut self`.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing::debug;

use super::{
    host::SharedTableData,
    locale::{LocaleCatalog, LocaleIdentity, LocaleNotFound, resolve_locale},
    parsers::TableParser,
    source_name::{InvalidSourceName, SourceNameResolver},
    table::TableEntry,
};

/// Content key that declares the locale of a table from inside the table.
pub const LOCALE_OVERRIDE_KEY: &str = "Key";

/// A table of custom translations for one locale.
#[derive(Debug, Clone)]
pub struct CustomLanguage {
    locale: LocaleIdentity,
    table: String,
    content: TableEntry,
    origin: PathBuf,
    locale_code: OnceLock<String>,
}

impl CustomLanguage {
    pub fn new(
        locale: LocaleIdentity,
        table: impl Into<String>,
        content: TableEntry,
        origin: impl Into<PathBuf>,
    ) -> Self {
        Self {
            locale,
            table: table.into(),
            content,
            origin: origin.into(),
            locale_code: OnceLock::new(),
        }
    }

    pub fn locale(&self) -> &LocaleIdentity {
        &self.locale
    }

    /// The raw locale token this language is registered under.
    pub fn locale_token(&self) -> &str {
        self.locale.name()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn content(&self) -> &TableEntry {
        &self.content
    }

    /// File the language was loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Culture code recorded at registration.
    pub fn locale_code(&self) -> Option<&str> {
        self.locale_code.get().map(String::as_str)
    }

    /// Record the culture code; only the first call has an effect.
    fn annotate_locale_code(&self) {
        let code = self.locale.code().unwrap_or(self.locale.name());
        let _ = self.locale_code.set(code.to_string());
    }
}

/// A [`CustomLanguage`] plus the resolution problem hit while building it.
#[derive(Debug)]
pub struct BuiltLanguage {
    pub language: CustomLanguage,
    pub locale_not_found: Option<LocaleNotFound>,
}

/// Build a custom language from a named table text.
///
/// The name gives the locale and table tokens. The locale identity is
/// resolved from the content's [`LOCALE_OVERRIDE_KEY`] value when it names a
/// known locale, otherwise from the locale token. The declaration row is not
/// kept as a translation. An unresolvable locale still produces a language,
/// with an opaque identity.
pub fn build_language(
    name: &str,
    text: &str,
    origin: &Path,
    resolver: &(impl SourceNameResolver + ?Sized),
    parser: &(impl TableParser + ?Sized),
    catalog: &(impl LocaleCatalog + ?Sized),
) -> Result<BuiltLanguage, InvalidSourceName> {
    let source = resolver.resolve(name)?;
    let mut content = parser.parse(text);

    let declared = content.remove(LOCALE_OVERRIDE_KEY);
    let culture = match declared.as_deref().map(|code| resolve_locale(catalog, code)) {
        Some(Ok(culture)) => Ok(culture),
        _ => resolve_locale(catalog, &source.locale),
    };
    let (locale, locale_not_found) = match culture {
        Ok(culture) => (LocaleIdentity::resolved(&source.locale, culture), None),
        Err(e) => (LocaleIdentity::opaque(&source.locale), Some(e)),
    };

    Ok(BuiltLanguage {
        language: CustomLanguage::new(locale, source.table, content, origin),
        locale_not_found,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    Uninitialized,
    Loading,
    Ready,
    Empty,
}

/// Kind of table the host asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    String,
    Asset,
}

/// Synthetic string table served for an overridden (table, locale).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    pub table: String,
    pub locale: LocaleIdentity,
    pub shared: SharedTableData,
    pub entries: TableEntry,
}

impl StringTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }
}

/// Answer to a table request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTable {
    /// The custom table replaces the host's table.
    Override(StringTable),
    /// The locale is overridden but this table is not; use host data for it.
    TableNotOverridden,
    /// No custom language for the locale; use host data entirely.
    NoOverride,
}

#[derive(Debug)]
pub struct Registry {
    state: RegistryState,
    loaded: HashMap<String, Vec<CustomLanguage>>,
    shared_cache: HashMap<String, SharedTableData>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            state: RegistryState::Uninitialized,
            loaded: HashMap::new(),
            shared_cache: HashMap::new(),
        }
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    /// Release any previous load and enter `Loading`.
    pub fn begin_load(&mut self) {
        self.release();
        self.state = RegistryState::Loading;
    }

    /// Append a language under its locale token, keeping discovery order.
    pub fn register(&mut self, language: CustomLanguage) {
        language.annotate_locale_code();
        debug!(
            "registered table '{}' for locale '{}' ({} entries)",
            language.table(),
            language.locale_token(),
            language.content().len()
        );
        self.loaded
            .entry(language.locale_token().to_string())
            .or_default()
            .push(language);
    }

    /// Store one shared-data snapshot, keyed by table name.
    pub fn cache_shared(&mut self, data: SharedTableData) {
        self.shared_cache.entry(data.table.clone()).or_insert(data);
    }

    /// Settle into `Ready` or `Empty` depending on what was registered.
    pub fn finish_load(&mut self) -> RegistryState {
        self.state = if self.loaded.is_empty() {
            RegistryState::Empty
        } else {
            RegistryState::Ready
        };
        self.state
    }

    /// Clear everything. Safe to call in any state, any number of times.
    pub fn release(&mut self) {
        self.loaded.clear();
        self.shared_cache.clear();
        self.state = RegistryState::Uninitialized;
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Number of registered languages across all locales.
    pub fn language_count(&self) -> usize {
        self.loaded.values().map(Vec::len).sum()
    }

    pub fn languages(&self, locale: &str) -> &[CustomLanguage] {
        self.loaded.get(locale).map(Vec::as_slice).unwrap_or_default()
    }

    /// Locale tokens with at least one language, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.loaded.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    pub fn shared_data(&self, table: &str) -> Option<&SharedTableData> {
        self.shared_cache.get(table)
    }

    pub fn cached_table_count(&self) -> usize {
        self.shared_cache.len()
    }

    /// Resolve which content serves `table` for `locale`.
    pub fn lookup(&self, table: &str, locale: &str) -> ResolvedTable {
        let Some(languages) = self.loaded.get(locale) else {
            return ResolvedTable::NoOverride;
        };

        let Some(language) = languages.iter().find(|l| l.table() == table) else {
            return ResolvedTable::TableNotOverridden;
        };

        match self.shared_cache.get(table) {
            Some(shared) => ResolvedTable::Override(StringTable {
                table: table.to_string(),
                locale: language.locale().clone(),
                shared: shared.clone(),
                entries: language.content().clone(),
            }),
            None => {
                debug!("no shared data cached for table '{}'", table);
                ResolvedTable::TableNotOverridden
            }
        }
    }

    /// Resolve a table request of the given kind.
    ///
    /// Asset tables are never overridden: an overridden locale is told to
    /// use the host's table.
    pub fn provide(&self, kind: TableKind, table: &str, locale: &str) -> ResolvedTable {
        match kind {
            TableKind::String => self.lookup(table, locale),
            TableKind::Asset if self.loaded.contains_key(locale) => {
                ResolvedTable::TableNotOverridden
            }
            TableKind::Asset => ResolvedTable::NoOverride,
        }
    }

    /// Culture code of the first language registered for `locale`.
    pub fn culture_for(&self, locale: &str) -> Option<&str> {
        self.languages(locale)
            .first()
            .and_then(CustomLanguage::locale_code)
    }
}
