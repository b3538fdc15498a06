//! Key coverage analysis for loaded overrides.
//!
//! Compares each registered table with the shared key set cached from the
//! host. Tables without cached shared data are not analyzed.

use std::collections::HashSet;

use super::registry::Registry;
use crate::issues::{Issue, MissingKeyIssue, UnknownKeyIssue};

/// Find override keys the host does not define and host keys left
/// untranslated.
pub fn key_issues(registry: &Registry) -> Vec<Issue> {
    let mut issues = Vec::new();

    for locale in registry.locales() {
        for language in registry.languages(locale) {
            let Some(shared) = registry.shared_data(language.table()) else {
                continue;
            };
            let file_path = language.origin().to_string_lossy().to_string();
            let shared_keys: HashSet<&str> = shared.keys.iter().map(|k| k.key.as_str()).collect();

            let mut unknown: Vec<&str> = language
                .content()
                .keys()
                .filter(|key| !shared_keys.contains(key))
                .collect();
            unknown.sort_unstable();
            issues.extend(unknown.into_iter().map(|key| {
                Issue::UnknownKey(UnknownKeyIssue {
                    file_path: file_path.clone(),
                    locale: locale.to_string(),
                    table: language.table().to_string(),
                    key: key.to_string(),
                })
            }));

            issues.extend(
                shared
                    .keys
                    .iter()
                    .filter(|k| !language.content().contains_key(&k.key))
                    .map(|k| {
                        Issue::MissingKey(MissingKeyIssue {
                            file_path: file_path.clone(),
                            locale: locale.to_string(),
                            table: language.table().to_string(),
                            key: k.key.clone(),
                        })
                    }),
            );
        }
    }

    issues
}
