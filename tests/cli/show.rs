use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

fn project() -> Result<CliTest> {
    CliTest::with_files(&[
        ("lang/en_UI.csv", "Key,Value\nHello,Hello\nBye,Goodbye\n"),
        ("lang/en_Menu.csv", "Start,Start\n"),
        ("lang/fr_UI.csv", "Key,Value\nHello,Bonjour\nBye,Au revoir\n"),
        ("lang/custom_UI.csv", "Key,de\nHello,Hallo\n"),
    ])
}

#[test]
fn test_show_override() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.show_command("UI", "fr"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ UI (fr) overridden, culture fr, 2 entries
      Bye    Au revoir
      Hello  Bonjour

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_show_json() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.show_command("UI", "fr").arg("--json"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "table": "UI",
      "locale": "fr",
      "status": "override",
      "culture": "fr",
      "entries": {
        "Bye": "Au revoir",
        "Hello": "Bonjour"
      }
    }

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_show_content_declared_locale() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.show_command("UI", "custom").arg("--json"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "table": "UI",
      "locale": "custom",
      "status": "override",
      "culture": "de",
      "entries": {
        "Hello": "Hallo"
      }
    }

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_show_table_not_overridden() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.show_command("Menu", "fr"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    - Menu (fr): locale is overridden but this table is not; host data is used

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_show_unknown_locale() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.show_command("UI", "pt").arg("--json"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "table": "UI",
      "locale": "pt",
      "status": "no-override",
      "culture": null
    }

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_show_mentions_load_issues() -> Result<()> {
    let test = project()?;
    test.write_file("lang/broken.csv", "Hello,Hi\n")?;

    assert_cmd_snapshot!(test.show_command("UI", "fr"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ UI (fr) overridden, culture fr, 2 entries
      Bye    Au revoir
      Hello  Bonjour

    ----- stderr -----
    warning: 1 load issue (run langpatch check for details)
    ");

    Ok(())
}
