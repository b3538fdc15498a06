use std::mem;

use super::TableParser;
use crate::core::table::TableEntry;

/// Quote-aware delimited parser.
///
/// Fields may be wrapped in quotes to carry delimiters, line breaks, and
/// doubled (`""`) quote characters. Only the first two fields of a record are
/// used as key and value; records with fewer than two fields are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvParser {
    delimiter: char,
    quote: char,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl CsvParser {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InQuotes,
}

impl TableParser for CsvParser {
    fn parse(&self, text: &str) -> TableEntry {
        let mut table = TableEntry::new();
        let mut state = ScanState::Normal;
        let mut field = String::new();
        let mut record: Vec<String> = Vec::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                ScanState::InQuotes => {
                    if c != self.quote {
                        field.push(c);
                    } else if chars.peek() == Some(&self.quote) {
                        // Escaped quote
                        chars.next();
                        field.push(self.quote);
                    } else {
                        state = ScanState::Normal;
                    }
                }
                ScanState::Normal => match c {
                    c if c == self.quote => state = ScanState::InQuotes,
                    c if c == self.delimiter => record.push(mem::take(&mut field)),
                    '\r' | '\n' => {
                        // \r\n is a single terminator
                        if c == '\r' && chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        record.push(mem::take(&mut field));
                        complete_record(&mut record, &mut table);
                    }
                    _ => field.push(c),
                },
            }
        }

        // Last record when the text does not end with a terminator
        if !field.is_empty() || !record.is_empty() {
            record.push(field);
            complete_record(&mut record, &mut table);
        }

        table
    }
}

fn complete_record(record: &mut Vec<String>, table: &mut TableEntry) {
    if let [key, value, ..] = record.as_slice() {
        table.insert_trimmed(key, value);
    }
    record.clear();
}
