use anyhow::Result;
use encoding_rs::WINDOWS_1256;

use crate::{CliTest, fr_catalog, stderr, stdout};

#[test]
fn test_convert_bom_and_line_endings_in_place() -> Result<()> {
    let messy = format!(
        "\u{feff}{}",
        fr_catalog("msgid \"Hello\"  \nmsgstr \"Bonjour\"\n\n\n\nmsgid \"Bye\"\nmsgstr \"Salut\"\n\n")
    )
    .replace('\n', "\r\n");
    let test = CliTest::with_file("i18n/fr.po", &messy)?;

    let output = test.run(&["convert", "i18n/fr.po"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Converted i18n/fr.po (removed BOM, "));

    let converted = test.read_file("i18n/fr.po")?;
    assert_eq!(
        converted,
        fr_catalog("msgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"Bye\"\nmsgstr \"Salut\"\n")
    );

    let output = test.run(&["convert", "i18n/fr.po"])?;
    assert!(stdout(&output).contains("i18n/fr.po is already normalized"));

    Ok(())
}

#[test]
fn test_convert_arabic_code_page_to_utf8() -> Result<()> {
    let source = "msgid \"\"\nmsgstr \"\"\n\"Language: ar\\n\"\n\"Content-Type: text/plain; charset=CP1256\\n\"\n\nmsgid \"Hello\"\nmsgstr \"مرحبا\"\n";
    let (bytes, _, _) = WINDOWS_1256.encode(source);
    let test = CliTest::with_file("ar.po", &bytes)?;

    let output = test.run(&["convert", "ar.po", "-o", "out/ar.po"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("re-encoded from windows-1256"));

    let converted = test.read_file("out/ar.po")?;
    assert!(converted.contains("msgstr \"مرحبا\""));
    assert!(converted.contains("charset=UTF-8"));
    assert_eq!(test.read_bytes("ar.po")?, bytes.to_vec());

    let output = test.run(&["validate", "out/ar.po", "--rule", "encoding"])?;
    assert!(output.status.success(), "stdout: {}", stdout(&output));

    Ok(())
}

#[test]
fn test_convert_forced_encoding() -> Result<()> {
    let test = CliTest::with_file("fr.po", b"msgid \"Coffee\"\nmsgstr \"Caf\xe9\"\n")?;

    let output = test.run(&["convert", "fr.po", "--from", "latin1"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("fr.po")?, "msgid \"Coffee\"\nmsgstr \"Café\"\n");

    let output = test.run(&["convert", "fr.po", "--from", "klingon"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unknown encoding 'klingon'"));

    Ok(())
}
