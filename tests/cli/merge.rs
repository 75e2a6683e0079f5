use anyhow::Result;

use crate::{CliTest, fr_catalog, stderr, stdout};

const TEMPLATE: &str = "msgid \"\"\nmsgstr \"\"\n\"Project-Id-Version: sale\\n\"\n\"MIME-Version: 1.0\\n\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\"Content-Transfer-Encoding: 8bit\\n\"\n\n#: models/sale_order.py:8\nmsgid \"Hello\"\nmsgstr \"\"\n\n#. attr:string\n#: views/sale_views.xml:5\nmsgid \"Status\"\nmsgstr \"\"\n";

#[test]
fn test_merge_keeps_translations() -> Result<()> {
    let test = CliTest::with_file(
        "i18n/fr.po",
        &fr_catalog("msgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"Removed\"\nmsgstr \"Retiré\"\n"),
    )?;
    test.write_file("i18n/sale.pot", TEMPLATE)?;

    let output = test.run(&[
        "merge",
        "--base",
        "i18n/fr.po",
        "--new",
        "i18n/sale.pot",
        "-o",
        "out/fr.po",
    ])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Merged 2 entries into out/fr.po (1 added, 1 obsolete)"));

    let merged = test.read_file("out/fr.po")?;
    assert!(merged.contains("\"Language: fr\\n\""));
    assert!(merged.contains("#: models/sale_order.py:8\nmsgid \"Hello\"\nmsgstr \"Bonjour\""));
    assert!(merged.contains("#. attr:string\n#: views/sale_views.xml:5\nmsgid \"Status\"\nmsgstr \"\""));
    assert!(merged.contains("#~ msgid \"Removed\"\n#~ msgstr \"Retiré\""));

    Ok(())
}

#[test]
fn test_merge_unparsable_input() -> Result<()> {
    let test = CliTest::with_file("base.po", "msgid \"a\"\nmsgstr \"b\"\nmsgid \"c\"\nmsgstr \"d\"\n")?;
    test.write_file("new.pot", TEMPLATE)?;

    let output = test.run(&["merge", "--base", "base.po", "--new", "new.pot", "-o", "out.po"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse catalog: base.po"));
    assert!(!test.root().join("out.po").exists());

    Ok(())
}
