use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["loadPath"], "./lang");
    assert_eq!(parsed["filePattern"], "*.csv");
    assert_eq!(parsed["tableFormat"], "csv");
    assert_eq!(parsed["defaultLocale"], "en");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .langpatchrc.json

    ----- stderr -----
    ");
    assert!(test.root().join(".langpatchrc.json").exists());

    let content = test.read_file(".langpatchrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".langpatchrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: .langpatchrc.json already exists
    ");
    assert_eq!(test.read_file(".langpatchrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("lang/en_UI.csv", "Hello,Hello\n")?;
    test.write_file("lang/fr_UI.csv", "Hello,Bonjour\n")?;

    let output = test.check_command().output()?;
    assert!(
        output.status.success(),
        "Check command should work with initialized config. stdout: {}",
        stdout(&output)
    );

    Ok(())
}
