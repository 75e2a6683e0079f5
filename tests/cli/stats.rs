use anyhow::Result;

use crate::{CliTest, fr_catalog, stderr, stdout};

#[test]
fn test_stats_for_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/fr.po",
        &fr_catalog(
            "#: models/sale.py:3 views/sale.xml:4\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n\n#: views/sale.xml:9\nmsgid \"Status\"\nmsgstr \"\"\n\n#~ msgid \"Old\"\n#~ msgstr \"Vieux\"\n",
        ),
    )?;

    let output = test.run(&["stats", "i18n/fr.po"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Statistics for: i18n/fr.po\nLanguage:    fr\n"));
    assert!(out.contains("Total:       2\nTranslated:  1\nFuzzy:       0\nEmpty:       1\nObsolete:    1\n"));
    assert!(out.contains("50.0%"));
    assert!(out.contains("      2  views/sale.xml  (1 missing)\n      1  models/sale.py\n"));

    let output = test.run(&["stats", "i18n/fr.po", "--top", "1"])?;
    assert!(!stdout(&output).contains("models/sale.py"));

    Ok(())
}

#[test]
fn test_stats_unparsable_catalog() -> Result<()> {
    let test = CliTest::with_file("broken.po", "msgid \"a\"\nmsgstr \"b\"\nmsgid \"c\"\nmsgstr \"d\"\n")?;

    let output = test.run(&["stats", "broken.po"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse catalog: broken.po"));

    Ok(())
}
