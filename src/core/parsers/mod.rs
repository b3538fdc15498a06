//! Table text parsers.
//!
//! Both parsers turn the raw text of a translation file into a [`TableEntry`]:
//! - `csv`: quote-aware comma-delimited scanner (multi-line quoted fields)
//! - `tsv`: line-based tab-delimited parser with a skipped header row
//!
//! Neither parser fails: malformed records are dropped and empty input yields
//! an empty table.

pub mod csv;
pub mod tsv;

use enum_dispatch::enum_dispatch;

pub use self::csv::CsvParser;
pub use self::tsv::TsvParser;
use super::table::TableEntry;

/// Converts table text into key/value content.
///
/// Implementations must be pure: the same text always yields the same table.
#[enum_dispatch]
pub trait TableParser {
    fn parse(&self, text: &str) -> TableEntry;
}

/// The parsers shipped with the crate.
#[enum_dispatch(TableParser)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinParser {
    Csv(CsvParser),
    Tsv(TsvParser),
}

impl Default for BuiltinParser {
    fn default() -> Self {
        BuiltinParser::Csv(CsvParser::default())
    }
}
