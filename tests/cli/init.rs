use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, sale_module, stderr};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .potkitrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".potkitrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["outputDir"], "i18n");
    assert!(parsed["translatableAttributes"].is_array());
    assert!(parsed["excludedDirs"].is_array());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".potkitrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".potkitrc.json already exists"));
    assert_eq!(test.read_file(".potkitrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = sale_module()?;

    test.command().arg("init").output()?;

    let output = test.run(&["extract", "sale", "-l", "fr"])?;
    assert!(
        output.status.success(),
        "extract should work with the generated config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
