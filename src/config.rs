use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::parsers::{BuiltinParser, CsvParser, TsvParser};

pub const CONFIG_FILE_NAME: &str = ".langpatchrc.json";

/// Text format of the translation tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn parser(self) -> BuiltinParser {
        match self {
            TableFormat::Csv => BuiltinParser::Csv(CsvParser::default()),
            TableFormat::Tsv => BuiltinParser::Tsv(TsvParser::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_load_path")]
    pub load_path: String,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default)]
    pub table_format: TableFormat,
    #[serde(default = "default_default_locale")]
    pub default_locale: String,
    /// Directory holding the product's default-locale tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_root: Option<String>,
}

fn default_load_path() -> String {
    "./lang".to_string()
}

fn default_file_pattern() -> String {
    "*.csv".to_string()
}

fn default_default_locale() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_path: default_load_path(),
            file_pattern: default_file_pattern(),
            table_format: TableFormat::default(),
            default_locale: default_default_locale(),
            base_root: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `filePattern` is not a valid glob or
    /// `defaultLocale` is blank.
    pub fn validate(&self) -> Result<()> {
        Pattern::new(&self.file_pattern).with_context(|| {
            format!(
                "Invalid glob pattern in 'filePattern': \"{}\"",
                self.file_pattern
            )
        })?;

        if self.default_locale.trim().is_empty() {
            bail!("'defaultLocale' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::core::parsers::TableParser;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.load_path, "./lang");
        assert_eq!(config.file_pattern, "*.csv");
        assert_eq!(config.table_format, TableFormat::Csv);
        assert_eq!(config.default_locale, "en");
        assert!(config.base_root.is_none());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "loadPath": "./translations",
              "filePattern": "*.tsv",
              "tableFormat": "tsv",
              "defaultLocale": "en-US",
              "baseRoot": "./base"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.load_path, "./translations");
        assert_eq!(config.file_pattern, "*.tsv");
        assert_eq!(config.table_format, TableFormat::Tsv);
        assert_eq!(config.default_locale, "en-US");
        assert_eq!(config.base_root.as_deref(), Some("./base"));
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "tableFormat": "tsv" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.table_format, TableFormat::Tsv);
        assert_eq!(config.load_path, default_load_path());
        assert_eq!(config.file_pattern, default_file_pattern());
    }

    #[test]
    fn test_unknown_table_format_is_rejected() {
        let json = r#"{ "tableFormat": "xlsx" }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_table_format_selects_parser() {
        let table = TableFormat::Tsv.parser().parse("Key\tValue\nHello\tSalut\n");
        assert_eq!(table.get("Hello"), Some("Salut"));

        let table = TableFormat::Csv.parser().parse("Hello,Salut\n");
        assert_eq!(table.get("Hello"), Some("Salut"));
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("assets").join("lang");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "loadPath": "./custom" }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.load_path, "./custom");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.load_path, default_load_path());
    }

    #[test]
    fn test_validate_invalid_file_pattern() {
        let config = Config {
            file_pattern: "[invalid".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("filePattern"));
    }

    #[test]
    fn test_validate_blank_default_locale() {
        let config = Config {
            default_locale: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "filePattern": "[invalid" }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_default_json_omits_base_root() {
        let json = default_config_json().unwrap();
        assert!(json.contains("loadPath"));
        assert!(json.contains("\"tableFormat\": \"csv\""));
        assert!(!json.contains("baseRoot"));
    }
}
