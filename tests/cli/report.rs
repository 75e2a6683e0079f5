use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, fr_catalog, sale_module, stderr, stdout};

/// 3 active entries: 1 translated, 1 fuzzy, 1 empty.
fn translated_sale_module() -> Result<CliTest> {
    let test = sale_module()?;
    test.write_file(
        "sale/i18n/fr.po",
        &fr_catalog(
            "msgid \"Hello\"\nmsgstr \"Bonjour\"\n\n#, fuzzy\nmsgid \"Status\"\nmsgstr \"Statut\"\n\n#~ msgid \"Old\"\n#~ msgstr \"Vieux\"\n",
        ),
    )?;
    Ok(test)
}

#[test]
fn test_report_text() -> Result<()> {
    let test = translated_sale_module()?;

    let output = test.run(&["report", "sale", "-l", "fr"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Translation report: sale (fr)\nCatalog:     i18n/fr.po\n"));
    assert!(out.contains("Total:       3\n"));
    assert!(out.contains("Translated:  1\n"));
    assert!(out.contains("Obsolete:    1\n"));
    assert!(out.contains("33.3%"));
    assert!(out.contains("\"Invoice %s due on %s\""));
    assert!(out.contains("\"Status\" (fuzzy)"));

    Ok(())
}

#[test]
fn test_report_below_threshold_fails() -> Result<()> {
    let test = translated_sale_module()?;

    let output = test.run(&["report", "sale", "-l", "fr", "--min-percentage", "50"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Completion 33.33% is below the required 50%"));

    let output = test.run(&["report", "sale", "-l", "fr", "--min-percentage", "30"])?;
    assert!(output.status.success());

    Ok(())
}

#[test]
fn test_report_threshold_from_config() -> Result<()> {
    let test = translated_sale_module()?;
    test.write_file(".potkitrc.json", r#"{ "minPercentage": 90 }"#)?;

    let output = test.run(&["report", "sale", "-l", "fr"])?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_report_invalid_threshold() -> Result<()> {
    let test = translated_sale_module()?;

    let output = test.run(&["report", "sale", "-l", "fr", "--min-percentage", "150"])?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_report_json() -> Result<()> {
    let test = translated_sale_module()?;

    let output = test.run(&["report", "sale", "-l", "fr", "--format", "json"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: Value = serde_json::from_str(&stdout(&output))?;

    assert_eq!(report["module"], "sale");
    assert_eq!(report["catalogExists"], true);
    assert_eq!(report["statistics"]["totalActive"], 3);
    assert_eq!(report["statistics"]["completionPercent"], 33.33);
    assert_eq!(report["missingByKind"]["imperative-call"], 1);
    assert_eq!(report["missingByKind"]["markup-attribute"], 1);
    let missing = report["missing"].as_array().map(Vec::len);
    assert_eq!(missing, Some(2));

    Ok(())
}

#[test]
fn test_report_without_catalog_counts_everything_missing() -> Result<()> {
    let test = sale_module()?;

    let output = test.run(&["report", "sale", "-l", "de", "--format", "csv"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("file,line,kind,fuzzy,msgid"));
    assert_eq!(lines.count(), 3);

    Ok(())
}

#[test]
fn test_report_to_file() -> Result<()> {
    let test = translated_sale_module()?;

    let output = test.run(&["report", "sale", "-l", "fr", "-o", "report.txt"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Report written to report.txt"));
    assert!(test.read_file("report.txt")?.contains("Translated:  1"));

    Ok(())
}
