use anyhow::Result;

use crate::{CliTest, fr_catalog, stderr, stdout};

const BODY: &str = "msgid \"Hello\"\nmsgstr \"Bonjour\"\n\n#~ msgid \"Old\"\n#~ msgstr \"Vieux\"\n";

#[test]
fn test_clean_removes_obsolete_in_place() -> Result<()> {
    let test = CliTest::with_file("i18n/fr.po", &fr_catalog(BODY))?;

    let output = test.run(&["clean", "i18n/fr.po"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Removed 1 obsolete entry from i18n/fr.po"));

    let cleaned = test.read_file("i18n/fr.po")?;
    assert!(cleaned.contains("msgstr \"Bonjour\""));
    assert!(!cleaned.contains("Old"));

    let output = test.run(&["clean", "i18n/fr.po"])?;
    assert!(stdout(&output).contains("No obsolete entries in i18n/fr.po"));

    Ok(())
}

#[test]
fn test_clean_to_other_file() -> Result<()> {
    let test = CliTest::with_file("i18n/fr.po", &fr_catalog(BODY))?;

    let output = test.run(&["clean", "i18n/fr.po", "-o", "clean/fr.po"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!test.read_file("clean/fr.po")?.contains("Old"));
    assert!(test.read_file("i18n/fr.po")?.contains("#~ msgid \"Old\""));

    Ok(())
}

#[test]
fn test_clean_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["clean", "i18n/fr.po"])?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
