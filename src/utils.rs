//! Common utility functions shared across the codebase.

use std::path::Path;

/// Compares two strings for equality ignoring case, using full Unicode
/// lowercase mapping rather than ASCII folding.
///
/// # Examples
///
/// ```
/// use langpatch::utils::eq_ignore_case;
///
/// assert!(eq_ignore_case("English", "ENGLISH"));
/// assert!(eq_ignore_case("Français", "FRANÇAIS"));
/// assert!(!eq_ignore_case("English", "Engl"));
/// ```
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Returns the file name without its extension.
///
/// Examples:
/// - "en-US_UIStrings.csv" -> Some("en-US_UIStrings")
/// - "/path/to/lang/fr_Menu.tsv" -> Some("fr_Menu")
pub fn source_stem(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Picks the singular or plural noun for a count.
pub fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
