//! Locale identity resolution.
//!
//! A locale token from a file name (or declared inside a table) is resolved in
//! two phases:
//!
//! 1. As a standard locale code (`en-US`, `zh_Hant`), via [`LocaleCatalog::from_code`].
//! 2. As a language name, by scanning [`LocaleCatalog::locales`] for the first
//!    entry whose English, native, or display name equals the token ignoring
//!    case. Catalogs are small, so this is a linear scan and the first match
//!    in catalog order wins.
//!
//! When both phases fail the caller keeps the raw token as an opaque locale.

use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::utils::eq_ignore_case;

/// A culture known to a [`LocaleCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
    /// Canonical code, e.g. `en-US`.
    pub code: String,
    pub english_name: String,
    pub native_name: String,
    pub display_name: String,
}

impl LocaleInfo {
    pub fn new(
        code: impl Into<String>,
        english_name: impl Into<String>,
        native_name: impl Into<String>,
    ) -> Self {
        let english_name = english_name.into();
        Self {
            code: code.into(),
            display_name: english_name.clone(),
            english_name,
            native_name: native_name.into(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no locale matches '{token}'")]
pub struct LocaleNotFound {
    pub token: String,
}

/// Identity of a loaded custom language.
///
/// `name` is always the locale token the language was registered under.
/// `culture` is `None` for an opaque locale, which has no canonical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleIdentity {
    name: String,
    culture: Option<LocaleInfo>,
}

impl LocaleIdentity {
    pub fn resolved(name: impl Into<String>, culture: LocaleInfo) -> Self {
        Self {
            name: name.into(),
            culture: Some(culture),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            culture: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn culture(&self) -> Option<&LocaleInfo> {
        self.culture.as_ref()
    }

    /// Canonical code, when the identity is culture-aware.
    pub fn code(&self) -> Option<&str> {
        self.culture.as_ref().map(|c| c.code.as_str())
    }

    pub fn is_opaque(&self) -> bool {
        self.culture.is_none()
    }
}

/// Source of known cultures.
pub trait LocaleCatalog {
    /// Build an identity directly from a standard locale code.
    fn from_code(&self, code: &str) -> Option<LocaleInfo>;

    /// Every known culture, in the catalog's enumeration order.
    fn locales(&self) -> &[LocaleInfo];
}

/// Resolve a locale token against a catalog.
pub fn resolve_locale(
    catalog: &(impl LocaleCatalog + ?Sized),
    token: &str,
) -> Result<LocaleInfo, LocaleNotFound> {
    if let Some(info) = catalog.from_code(token) {
        return Ok(info);
    }

    catalog
        .locales()
        .iter()
        .find(|info| {
            eq_ignore_case(&info.english_name, token)
                || eq_ignore_case(&info.native_name, token)
                || eq_ignore_case(&info.display_name, token)
        })
        .cloned()
        .ok_or_else(|| LocaleNotFound {
            token: token.to_string(),
        })
}

/// (code, English name, native name, display name when it differs)
const BUILTIN_LOCALES: &[(&str, &str, &str, Option<&str>)] = &[
    ("ar", "Arabic", "العربية", None),
    ("bg", "Bulgarian", "български", None),
    ("ca", "Catalan", "català", None),
    ("cs", "Czech", "čeština", None),
    ("da", "Danish", "dansk", None),
    ("de", "German", "Deutsch", None),
    ("de-DE", "German (Germany)", "Deutsch (Deutschland)", None),
    ("el", "Greek", "Ελληνικά", None),
    ("en", "English", "English", None),
    ("en-GB", "English (United Kingdom)", "English (United Kingdom)", None),
    ("en-US", "English (United States)", "English (United States)", None),
    ("es", "Spanish", "español", None),
    ("es-ES", "Spanish (Spain)", "español (España)", None),
    ("es-MX", "Spanish (Mexico)", "español (México)", None),
    ("fa", "Persian", "فارسی", None),
    ("fi", "Finnish", "suomi", None),
    ("fr", "French", "français", None),
    ("fr-CA", "French (Canada)", "français (Canada)", None),
    ("fr-FR", "French (France)", "français (France)", None),
    ("he", "Hebrew", "עברית", None),
    ("hi", "Hindi", "हिन्दी", None),
    ("hu", "Hungarian", "magyar", None),
    ("id", "Indonesian", "Indonesia", None),
    ("it", "Italian", "italiano", None),
    ("ja", "Japanese", "日本語", None),
    ("ja-JP", "Japanese (Japan)", "日本語 (日本)", None),
    ("ko", "Korean", "한국어", None),
    ("ko-KR", "Korean (Korea)", "한국어 (대한민국)", None),
    ("ms", "Malay", "Melayu", None),
    ("nb", "Norwegian Bokmål", "norsk bokmål", Some("Norwegian")),
    ("nl", "Dutch", "Nederlands", None),
    ("pl", "Polish", "polski", None),
    ("pt", "Portuguese", "português", None),
    ("pt-BR", "Portuguese (Brazil)", "português (Brasil)", None),
    ("pt-PT", "Portuguese (Portugal)", "português (Portugal)", None),
    ("ro", "Romanian", "română", None),
    ("ru", "Russian", "русский", None),
    ("sk", "Slovak", "slovenčina", None),
    ("sv", "Swedish", "svenska", None),
    ("th", "Thai", "ไทย", None),
    ("tr", "Turkish", "Türkçe", None),
    ("uk", "Ukrainian", "українська", None),
    ("vi", "Vietnamese", "Tiếng Việt", None),
    ("zh", "Chinese", "中文", None),
    (
        "zh-Hans",
        "Chinese (Simplified)",
        "中文（简体）",
        Some("Simplified Chinese"),
    ),
    (
        "zh-Hant",
        "Chinese (Traditional)",
        "中文（繁體）",
        Some("Traditional Chinese"),
    ),
    ("zh-CN", "Chinese (China)", "中文（中国）", None),
    ("zh-TW", "Chinese (Taiwan)", "中文（台灣）", None),
];

/// Catalog of common cultures shipped with the crate.
///
/// Codes are parsed with `unic-langid`, so separators (`-` or `_`) and case
/// are normalized. A code is accepted only when its language subtag is in the
/// catalog; regional variants not listed explicitly are derived from their
/// base language.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    entries: Vec<LocaleInfo>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        let entries = BUILTIN_LOCALES
            .iter()
            .map(|&(code, english, native, display)| {
                let info = LocaleInfo::new(code, english, native);
                match display {
                    Some(display) => info.with_display_name(display),
                    None => info,
                }
            })
            .collect();
        Self { entries }
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog over a caller-supplied list, kept in the given order.
    pub fn from_entries(entries: Vec<LocaleInfo>) -> Self {
        Self { entries }
    }

    fn entry(&self, code: &str) -> Option<&LocaleInfo> {
        self.entries.iter().find(|e| e.code.eq_ignore_ascii_case(code))
    }
}

impl LocaleCatalog for BuiltinCatalog {
    fn from_code(&self, code: &str) -> Option<LocaleInfo> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        let langid: LanguageIdentifier = code.parse().ok()?;
        let canonical = langid.to_string();
        if let Some(exact) = self.entry(&canonical) {
            return Some(exact.clone());
        }

        let language = langid.language.to_string();
        let base = self.entry(&language)?;
        let extra = canonical[language.len()..].trim_start_matches('-');
        let display_name = format!("{} ({})", base.english_name, extra);

        Some(LocaleInfo {
            code: canonical,
            english_name: base.english_name.clone(),
            native_name: base.native_name.clone(),
            display_name,
        })
    }

    fn locales(&self) -> &[LocaleInfo] {
        &self.entries
    }
}
