//! Interfaces to the host localization framework.
//!
//! The core never stores host tables itself. It asks the host for shared table
//! metadata, announces new locales, and attaches or detaches itself as the
//! table provider. [`MemoryHost`] is a self-contained implementation used by
//! the CLI and by tests.

use std::{
    collections::BTreeMap,
    future::{self, Future},
};

use serde::Serialize;
use thiserror::Error;

use super::{locale::LocaleIdentity, table::TableEntry};

/// One key of a table's shared metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedKey {
    pub id: u64,
    pub key: String,
}

/// Structural data about a table, shared by every locale: its key set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SharedTableData {
    pub table: String,
    pub keys: Vec<SharedKey>,
}

impl SharedTableData {
    /// Build metadata from a list of keys. Ids follow list order.
    pub fn new<I, S>(table: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .enumerate()
            .map(|(id, key)| SharedKey {
                id: id as u64,
                key: key.into(),
            })
            .collect();
        Self {
            table: table.into(),
            keys,
        }
    }

    /// Metadata for a parsed table, with keys in sorted order so ids are stable.
    pub fn from_table(table: impl Into<String>, content: &TableEntry) -> Self {
        let mut keys: Vec<&str> = content.keys().collect();
        keys.sort_unstable();
        Self::new(table, keys)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k.key == key)
    }

    pub fn key_id(&self, key: &str) -> Option<u64> {
        self.keys.iter().find(|k| k.key == key).map(|k| k.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("table '{table}' is not available for locale '{locale}'")]
    TableNotFound { table: String, locale: String },
    #[error("table '{table}' has no shared data")]
    NoSharedData { table: String },
    #[error("host operation failed: {0}")]
    Failed(String),
}

/// Capabilities the core needs from the host localization framework.
pub trait LocalizationHost {
    /// Locale the host's own tables are authored in.
    fn default_locale(&self) -> String;

    /// Names of every table known to `locale`.
    fn table_names(&self, locale: &str) -> Vec<String>;

    /// Fetch a copy of a table's shared metadata.
    ///
    /// The returned value must be owned by the caller; mutating it must not
    /// affect the host.
    fn shared_table_data(
        &self,
        table: &str,
        locale: &str,
    ) -> impl Future<Output = Result<SharedTableData, HostError>> + Send;

    /// Make a newly loaded locale selectable in the host.
    ///
    /// Returns `false` when the host already offered the locale.
    fn add_locale(&mut self, identity: &LocaleIdentity) -> bool;

    /// Withdraw a locale previously added with [`LocalizationHost::add_locale`].
    fn remove_locale(&mut self, identity: &LocaleIdentity);

    /// Route the host's table requests through the custom provider.
    fn attach_provider(&mut self);

    /// Restore the host's default table resolution.
    fn detach_provider(&mut self);
}

/// In-memory host holding shared metadata for the default locale.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    default_locale: String,
    tables: BTreeMap<String, Option<SharedTableData>>,
    locales: Vec<LocaleIdentity>,
    provider_attached: bool,
}

impl MemoryHost {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            ..Self::default()
        }
    }

    /// Build a host whose default-locale tables are the given parsed tables.
    pub fn from_tables<'a>(
        default_locale: impl Into<String>,
        tables: impl IntoIterator<Item = (&'a str, &'a TableEntry)>,
    ) -> Self {
        let mut host = Self::new(default_locale);
        for (name, content) in tables {
            host.insert_table(SharedTableData::from_table(name, content));
        }
        host
    }

    pub fn insert_table(&mut self, data: SharedTableData) {
        self.tables.insert(data.table.clone(), Some(data));
    }

    /// Register a table name whose shared data cannot be fetched.
    pub fn insert_table_without_data(&mut self, table: impl Into<String>) {
        self.tables.insert(table.into(), None);
    }

    pub fn locales(&self) -> &[LocaleIdentity] {
        &self.locales
    }

    pub fn is_provider_attached(&self) -> bool {
        self.provider_attached
    }
}

impl LocalizationHost for MemoryHost {
    fn default_locale(&self) -> String {
        self.default_locale.clone()
    }

    fn table_names(&self, locale: &str) -> Vec<String> {
        if locale != self.default_locale {
            return Vec::new();
        }
        self.tables.keys().cloned().collect()
    }

    fn shared_table_data(
        &self,
        table: &str,
        locale: &str,
    ) -> impl Future<Output = Result<SharedTableData, HostError>> + Send {
        let result = if locale != self.default_locale {
            Err(HostError::TableNotFound {
                table: table.to_string(),
                locale: locale.to_string(),
            })
        } else {
            match self.tables.get(table) {
                Some(Some(data)) => Ok(data.clone()),
                Some(None) => Err(HostError::NoSharedData {
                    table: table.to_string(),
                }),
                None => Err(HostError::TableNotFound {
                    table: table.to_string(),
                    locale: locale.to_string(),
                }),
            }
        };
        future::ready(result)
    }

    fn add_locale(&mut self, identity: &LocaleIdentity) -> bool {
        if self.locales.iter().any(|l| l.name() == identity.name()) {
            return false;
        }
        self.locales.push(identity.clone());
        true
    }

    fn remove_locale(&mut self, identity: &LocaleIdentity) {
        self.locales.retain(|l| l.name() != identity.name());
    }

    fn attach_provider(&mut self) {
        self.provider_attached = true;
    }

    fn detach_provider(&mut self) {
        self.provider_attached = false;
    }
}
