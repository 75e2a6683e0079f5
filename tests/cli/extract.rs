use anyhow::Result;

use crate::{CliTest, fr_catalog, sale_module, stderr, stdout};

#[test]
fn test_extract_writes_template_and_catalog() -> Result<()> {
    let test = sale_module()?;

    let output = test.run(&["extract", "sale", "--lang", "fr"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Extracted 3 entries from 2 files in sale"));

    let template = test.read_file("sale/i18n/sale.pot")?;
    assert_eq!(template.matches("msgid \"Hello\"").count(), 1);
    assert!(template.contains("#: models/sale_order.py:8 models/sale_order.py:9\n"));
    assert!(template.contains("#, python-format\nmsgid \"Invoice %s due on %s\""));
    assert!(template.contains("#: views/sale_views.xml:5\n"));
    assert!(template.contains("msgid \"Status\""));
    assert!(!template.contains("Language:"));

    let catalog = test.read_file("sale/i18n/fr.po")?;
    assert!(catalog.contains("\"Language: fr\\n\""));
    assert!(catalog.contains("\"Plural-Forms: nplurals=2;"));
    assert!(catalog.contains("msgid \"Status\"\nmsgstr \"\""));

    Ok(())
}

#[test]
fn test_extract_keeps_existing_translations() -> Result<()> {
    let test = sale_module()?;
    test.write_file(
        "sale/i18n/fr.po",
        &fr_catalog(
            "msgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"Removed\"\nmsgstr \"Supprimé\"\n",
        ),
    )?;

    let output = test.run(&["extract", "sale", "-l", "fr", "--no-pot"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("(2 added, 1 obsolete)"));
    assert!(!test.root().join("sale/i18n/sale.pot").exists());

    let catalog = test.read_file("sale/i18n/fr.po")?;
    assert!(catalog.contains("msgid \"Hello\"\nmsgstr \"Bonjour\""));
    assert!(catalog.contains("#~ msgid \"Removed\"\n#~ msgstr \"Supprimé\""));

    Ok(())
}

#[test]
fn test_extract_reports_non_literal_calls() -> Result<()> {
    let test = CliTest::with_file(
        "stock/models/picking.py",
        "def warn(label):\n    raise UserError(_(label))\n",
    )?;

    let output = test.run(&["extract", "stock", "-l", "de"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("non-literal-call"));
    assert!(out.contains("  --> models/picking.py:2"));

    Ok(())
}

#[test]
fn test_extract_survives_unscannable_file() -> Result<()> {
    let test = sale_module()?;
    test.write_file("sale/models/broken.py", "x = _('unterminated\n")?;

    let output = test.run(&["extract", "sale", "-l", "fr"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("1 file(s) could not be scanned (use -v for details)"));
    assert!(test.read_file("sale/i18n/fr.po")?.contains("msgid \"Hello\""));

    let verbose = test.run(&["extract", "sale", "-l", "fr", "-v"])?;
    assert!(stdout(&verbose).contains("  --> models/broken.py:1"));
    assert!(!stderr(&verbose).contains("could not be scanned"));

    Ok(())
}

#[test]
fn test_extract_output_dir_override() -> Result<()> {
    let test = sale_module()?;

    let output = test.run(&["extract", "sale", "-l", "ar", "--output-dir", "locale"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let catalog = test.read_file("sale/locale/ar.po")?;
    assert!(catalog.contains("nplurals=6;"));

    Ok(())
}

#[test]
fn test_extract_unknown_locale() -> Result<()> {
    let test = sale_module()?;

    let output = test.run(&["extract", "sale", "-l", "xx"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown locale 'xx'"));
    assert!(!test.root().join("sale/i18n").exists());

    Ok(())
}

#[test]
fn test_extract_missing_module() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["extract", "nowhere", "-l", "fr"])?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
