use anyhow::Result;

use crate::{CliTest, fr_catalog, stderr, stdout};

const AR_HEADER: &str = "msgid \"\"\nmsgstr \"\"\n\"Language: ar\\n\"\n\"MIME-Version: 1.0\\n\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\"Content-Transfer-Encoding: 8bit\\n\"\n";

#[test]
fn test_validate_clean_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/fr.po",
        &fr_catalog("msgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"Sales\"\nmsgstr \"Ventes\"\n"),
    )?;

    let output = test.run(&["validate", "i18n/fr.po"])?;
    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(
        stdout(&output).contains("Checked 2 entries in i18n/fr.po (fr) - no problems found")
    );

    Ok(())
}

#[test]
fn test_validate_placeholder_mismatch() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/fr.po",
        &fr_catalog(
            "#: models/account_move.py:12\n#, python-format\nmsgid \"Invoice %s due on %s\"\nmsgstr \"Facture %s\"\n",
        ),
    )?;

    let output = test.run(&["validate", "i18n/fr.po"])?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains(
        "error: \"placeholder count mismatch: expected 2, found 1\"  placeholder-count"
    ));
    assert!(out.contains("= note: msgid \"Invoice %s due on %s\""));
    assert!(out.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_validate_hungarian_header_language() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/hu.po",
        "msgid \"\"\nmsgstr \"\"\n\"Language: hu\\n\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\n#, python-format\nmsgid \"%s due on %s\"\nmsgstr \"%s\"\n",
    )?;

    let output = test.run(&["validate", "i18n/hu.po"])?;
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("placeholder-count"));
    assert!(!stderr(&output).contains("unknown language"));

    Ok(())
}

#[test]
fn test_validate_unknown_header_language_still_checks() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/custom.po",
        "msgid \"\"\nmsgstr \"\"\n\"Language: tlh\\n\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\n#, python-format\nmsgid \"%s due on %s\"\nmsgstr \"%s\"\n",
    )?;

    let output = test.run(&["validate", "i18n/custom.po"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("placeholder-count"));
    assert!(stderr(&output).contains(
        "warning: unknown language 'tlh' in header; locale-specific checks are skipped"
    ));

    Ok(())
}

#[test]
fn test_validate_plural_forms_against_locale() -> Result<()> {
    let wrong = format!(
        "{}\"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"\n\nmsgid \"Hello\"\nmsgstr \"مرحبا\"\n",
        AR_HEADER
    );
    let test = CliTest::with_file("ar.po", &wrong)?;

    let output = test.run(&["validate", "ar.po"])?;
    assert!(output.status.success(), "warnings alone do not fail");
    assert!(stdout(&output).contains("plural-forms"));

    let right = format!(
        "{}\"Plural-Forms: nplurals=6; plural=(n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5);\\n\"\n\nmsgid \"Hello\"\nmsgstr \"مرحبا\"\n",
        AR_HEADER
    );
    test.write_file("ar.po", &right)?;
    let output = test.run(&["validate", "ar.po"])?;
    assert!(output.status.success());
    assert!(!stdout(&output).contains("plural-forms"));

    Ok(())
}

#[test]
fn test_validate_parse_error() -> Result<()> {
    let test = CliTest::with_file(
        "broken.po",
        "msgid \"a\"\nmsgstr \"b\"\nmsgid \"c\"\nmsgstr \"d\"\n",
    )?;

    let output = test.run(&["validate", "broken.po", "--lang", "fr"])?;
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("parse-error"));
    assert!(out.contains("  --> broken.po:3"));

    Ok(())
}

#[test]
fn test_validate_unknown_locale() -> Result<()> {
    let test = CliTest::with_file("i18n/fr.po", &fr_catalog(""))?;

    let output = test.run(&["validate", "i18n/fr.po", "--lang", "xx"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown locale 'xx'"));

    Ok(())
}

#[test]
fn test_validate_strict_untranslated() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/fr.po",
        &fr_catalog("msgid \"Hello\"\nmsgstr \"\"\n"),
    )?;

    let output = test.run(&["validate", "i18n/fr.po"])?;
    assert!(output.status.success());

    let output = test.run(&["validate", "i18n/fr.po", "--strict"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("untranslated"));

    Ok(())
}

#[test]
fn test_validate_selected_rules_only() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/fr.po",
        &fr_catalog(
            "#, fuzzy\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n\n#, python-format\nmsgid \"%s left\"\nmsgstr \"restant\"\n",
        ),
    )?;

    let output = test.run(&["validate", "i18n/fr.po", "--rule", "fuzzy"])?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("  fuzzy"));
    assert!(!out.contains("placeholder-count"));

    let output = test.run(&["validate", "i18n/fr.po"])?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}
