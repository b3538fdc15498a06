use std::collections::HashMap;

/// Key/value content parsed from a single table file.
///
/// Keys are case-sensitive and unique. A key that is empty after trimming
/// is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableEntry {
    entries: HashMap<String, String>,
}

impl TableEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim both sides and store the pair, replacing any earlier value.
    ///
    /// Returns false (and stores nothing) when the trimmed key is empty.
    pub fn insert_trimmed(&mut self, key: &str, value: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.entries.insert(key.to_string(), value.trim().to_string());
        true
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.entries
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for TableEntry {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = TableEntry::new();
        for (key, value) in iter {
            table.insert_trimmed(key.as_ref(), value.as_ref());
        }
        table
    }
}
