use super::TableParser;
use crate::core::table::TableEntry;

/// Line-based delimited parser without quoting.
///
/// The first non-empty line is a header and is skipped. Each following line
/// contributes its first field as key and its second field as value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TsvParser {
    delimiter: char,
}

impl Default for TsvParser {
    fn default() -> Self {
        Self { delimiter: '\t' }
    }
}

impl TsvParser {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl TableParser for TsvParser {
    fn parse(&self, text: &str) -> TableEntry {
        let mut table = TableEntry::new();

        // Splitting on both characters turns \r\n into an empty piece,
        // which is discarded with the other empty lines.
        let lines = text.split(['\r', '\n']).filter(|line| !line.is_empty());

        for line in lines.skip(1) {
            let mut parts = line.split(self.delimiter);
            if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
                table.insert_trimmed(key, value);
            }
        }

        table
    }
}
