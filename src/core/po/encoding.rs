//! Byte-level decoding and layout normalization of catalog files.
//!
//! Catalogs written by older tools are often latin-1 or an Arabic code page
//! (`cp1256`, `iso-8859-6`), may start with a byte-order mark and may use
//! CRLF line endings. [`decode`] turns such a file into UTF-8 text and
//! [`normalize_layout`] gives it the layout `serialize` produces.

use std::{borrow::Cow, sync::LazyLock};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::{Regex, bytes::Regex as BytesRegex};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// `charset=` in a `Content-Type` header line, read before decoding.
static DECLARED_CHARSET: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r"Content-Type:(?-u:[^\n])*?charset=([A-Za-z0-9._:-]+)").unwrap()
});

static CHARSET_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Content-Type:[^\n]*?charset=)[A-Za-z0-9._:-]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),
    #[error("file is not valid {0}")]
    Malformed(&'static str),
}

/// A catalog file decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Encoding the bytes were read as.
    pub encoding: &'static Encoding,
    pub had_bom: bool,
}

impl Decoded {
    pub fn transcoded(&self) -> bool {
        self.encoding != UTF_8
    }
}

/// Look up an encoding by any of its WHATWG labels (`latin1`, `cp1256`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, DecodeError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DecodeError::UnknownEncoding(label.to_string()))
}

/// Decode catalog bytes.
///
/// With `forced` the bytes must be valid in that encoding. Otherwise valid
/// UTF-8 wins, then the charset the header declares, then latin-1 (which
/// accepts any byte sequence). A declared UTF-8 charset on invalid bytes
/// also falls back to latin-1.
pub fn decode(bytes: &[u8], forced: Option<&'static Encoding>) -> Result<Decoded, DecodeError> {
    let (bytes, had_bom) = match bytes.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (bytes, false),
    };

    if let Some(encoding) = forced {
        let text = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(DecodeError::Malformed(encoding.name()))?;
        return Ok(Decoded {
            text: text.into_owned(),
            encoding,
            had_bom,
        });
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Decoded {
            text: text.to_string(),
            encoding: UTF_8,
            had_bom,
        });
    }

    let declared = DECLARED_CHARSET
        .captures(bytes)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Encoding::for_label(m.as_bytes()))
        .filter(|encoding| *encoding != UTF_8);
    for encoding in declared.into_iter().chain([WINDOWS_1252]) {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return Ok(Decoded {
                text: text.into_owned(),
                encoding,
                had_bom,
            });
        }
    }
    Err(DecodeError::Malformed(WINDOWS_1252.name()))
}

/// Point the header's `charset=` at UTF-8.
pub fn declare_utf8(text: &str) -> Cow<'_, str> {
    CHARSET_FIELD.replace(text, "${1}UTF-8")
}

/// LF line endings, no trailing whitespace, at most one blank line in a
/// row, no leading blank lines and one final newline.
pub fn normalize_layout(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut pending_blank = false;
    for line in unified.lines().map(str::trim_end) {
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use encoding_rs::WINDOWS_1256;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_utf8_with_bom() {
        let decoded = decode("\u{feff}msgid \"é\"".as_bytes(), None).unwrap();
        assert_eq!(decoded.text, "msgid \"é\"");
        assert!(decoded.had_bom);
        assert!(!decoded.transcoded());
    }

    #[test]
    fn test_latin1_fallback() {
        let decoded = decode(b"msgstr \"caf\xe9\"", None).unwrap();
        assert_eq!(decoded.text, "msgstr \"café\"");
        assert_eq!(decoded.encoding, WINDOWS_1252);
    }

    #[test]
    fn test_declared_charset_is_used() {
        let text = "\"Content-Type: text/plain; charset=CP1256\\n\"\nmsgstr \"مرحبا\"\n";
        let (bytes, _, _) = WINDOWS_1256.encode(text);
        let decoded = decode(&bytes, None).unwrap();
        assert_eq!(decoded.encoding, WINDOWS_1256);
        assert!(decoded.text.contains("مرحبا"));
    }

    #[test]
    fn test_forced_encoding() {
        let cp1256 = encoding_for_label("cp1256").unwrap();
        let (bytes, _, _) = cp1256.encode("شكرا");
        assert_eq!(decode(&bytes, Some(cp1256)).unwrap().text, "شكرا");
        assert_eq!(
            decode(b"\xff\xfe", Some(UTF_8)),
            Err(DecodeError::Malformed("UTF-8"))
        );
        assert_eq!(
            encoding_for_label("klingon"),
            Err(DecodeError::UnknownEncoding("klingon".to_string()))
        );
    }

    #[test]
    fn test_declare_utf8() {
        assert_eq!(
            declare_utf8("\"Content-Type: text/plain; charset=ISO-8859-6\\n\""),
            "\"Content-Type: text/plain; charset=UTF-8\\n\""
        );
    }

    #[test]
    fn test_normalize_layout() {
        assert_eq!(
            normalize_layout("\n\nmsgid \"a\"  \r\nmsgstr \"b\"\r\n\r\n\r\n\nmsgid \"c\"\rmsgstr \"d\"\n\n\n"),
            "msgid \"a\"\nmsgstr \"b\"\n\nmsgid \"c\"\nmsgstr \"d\"\n"
        );
        assert_eq!(normalize_layout(""), "");
    }
}
