//! Source name resolution.
//!
//! A translation file is identified by its stem, `<locale>_<table>`, for
//! example `en-US_UIStrings.csv`. Segments after the table name are ignored.

use thiserror::Error;

/// Locale and table tokens extracted from a source name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceName {
    pub locale: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid source name '{name}': {reason}")]
pub struct InvalidSourceName {
    pub name: String,
    pub reason: &'static str,
}

impl InvalidSourceName {
    fn new(name: &str, reason: &'static str) -> Self {
        Self {
            name: name.to_string(),
            reason,
        }
    }
}

/// Splits a logical source identifier into locale and table tokens.
pub trait SourceNameResolver {
    fn resolve(&self, name: &str) -> Result<SourceName, InvalidSourceName>;
}

/// Resolves `<locale>_<table>[_ignored...]` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderscoreSourceName {
    delimiter: char,
}

impl Default for UnderscoreSourceName {
    fn default() -> Self {
        Self { delimiter: '_' }
    }
}

const EXPECTED_FORMAT: &str = "expected <locale>_<table>";

impl SourceNameResolver for UnderscoreSourceName {
    fn resolve(&self, name: &str) -> Result<SourceName, InvalidSourceName> {
        if name.is_empty() {
            return Err(InvalidSourceName::new(name, "name is empty"));
        }

        let mut segments = name.split(self.delimiter).filter(|s| !s.is_empty());
        let (Some(locale), Some(table)) = (segments.next(), segments.next()) else {
            return Err(InvalidSourceName::new(name, EXPECTED_FORMAT));
        };

        let (locale, table) = (locale.trim(), table.trim());
        if locale.is_empty() || table.is_empty() {
            return Err(InvalidSourceName::new(name, EXPECTED_FORMAT));
        }

        Ok(SourceName {
            locale: locale.to_string(),
            table: table.to_string(),
        })
    }
}
