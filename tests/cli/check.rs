use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr, stdout};

const BASE_UI: &str = "Key,Value\nHello,Hello\nBye,Goodbye\n";

#[test]
fn test_clean_load() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en_UI.csv", BASE_UI),
        ("lang/fr_UI.csv", "Key,Value\nHello,Bonjour\nBye,Au revoir\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Loaded 2 custom tables for 2 locales - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_directory_fails() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: load directory './lang' does not exist  directory-missing
      --> ./lang
      = hint: check the 'loadPath' setting in .langpatchrc.json

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_absolute_load_path() -> Result<()> {
    let test = CliTest::new()?;
    let missing = test.root().join("gone");
    let root = test.root_pattern();

    let mut cmd = test.check_command();
    cmd.arg("--load-path").arg(&missing);

    insta::with_settings!({ filters => vec![(root.as_str(), "[ROOT]")] }, {
        assert_cmd_snapshot!(cmd, @r"
        success: false
        exit_code: 1
        ----- stdout -----
        error: load directory '[ROOT]/gone' does not exist  directory-missing
          --> [ROOT]/gone
          = hint: check the 'loadPath' setting in .langpatchrc.json

        ✘ 1 problem (1 error, 0 warnings)

        ----- stderr -----
        ");
    });

    Ok(())
}

#[test]
fn test_invalid_name_is_error_but_others_load() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en_UI.csv", BASE_UI),
        ("lang/UIStrings.csv", "Hello,Bonjour\n"),
        ("lang/de_UI.csv", "Hello,Hallo\nBye,Tschüss\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: 'UIStrings': expected <locale>_<table>  invalid-source-name
      --> ./lang/UIStrings.csv
      = hint: rename the file to <locale>_<table>, e.g. en-US_UIStrings.csv

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_key_drift_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en_UI.csv", BASE_UI),
        ("lang/fr_UI.csv", "Hello,Bonjour\nTitle,Titre\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: 'Title' is not defined in table 'UI' (fr)  unknown-key
      --> ./lang/fr_UI.csv

    warning: 'Bye' from table 'UI' has no translation (fr)  missing-key
      --> ./lang/fr_UI.csv

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_unknown_locale_warns() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en_UI.csv", BASE_UI),
        ("lang/Klingonese_UI.csv", "Hello,nuqneH\nBye,Qapla'\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: 'Klingonese' is not a known locale code or language name  locale-not-found
      --> ./lang/Klingonese_UI.csv
      = hint: the table is loaded without culture-aware formatting

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_byte_order_mark_is_ignored() -> Result<()> {
    let test = CliTest::with_files(&[
        ("lang/en_UI.csv", BASE_UI),
        (
            "lang/custom_UI.csv",
            "\u{feff}Key,fr\nHello,Bonjour\nBye,Au revoir\n",
        ),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Loaded 2 custom tables for 2 locales - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_file_selects_tsv() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".langpatchrc.json",
            r#"{ "loadPath": "./i18n", "filePattern": "*.tsv", "tableFormat": "tsv" }"#,
        ),
        ("i18n/en_UI.tsv", "Key\tValue\nHello\tHello\n"),
        ("i18n/ja_UI.tsv", "Key\tValue\nHello\tこんにちは\n"),
        ("i18n/ignored.csv", "not,a table"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Loaded 2 custom tables for 2 locales - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_flags_override_config() -> Result<()> {
    let test = CliTest::with_files(&[
        (".langpatchrc.json", r#"{ "loadPath": "./missing" }"#),
        ("other/en_UI.csv", BASE_UI),
    ])?;

    assert_cmd_snapshot!(test.check_command().args(["--load-path", "other"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Loaded 1 custom table for 1 locale - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_invalid_config_is_error_status() -> Result<()> {
    let test = CliTest::with_files(&[(".langpatchrc.json", r#"{ "filePattern": "[oops" }"#)])?;

    let output = test.check_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("filePattern"));
    Ok(())
}

#[test]
fn test_verbose_logs_to_stderr() -> Result<()> {
    let test = CliTest::with_files(&[("lang/en_UI.csv", BASE_UI)])?;

    let output = test.check_command().arg("-v").output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("registered table 'UI'"));
    Ok(())
}
