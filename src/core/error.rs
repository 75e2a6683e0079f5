//! Typed errors for the catalog pipeline.
//!
//! Structural errors (catalog text that cannot be parsed), scan errors (one
//! source file that could not be scanned) and configuration errors (unknown
//! locale) are kept apart so callers can decide which ones abort a run.

use thiserror::Error;

/// What went wrong while parsing a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("missing blank line between entries")]
    MissingSeparator,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("'msgstr' without a preceding 'msgid'")]
    MsgstrWithoutMsgid,
    #[error("entry has no 'msgstr'")]
    MissingMsgstr,
    #[error("duplicate '{0}' in one entry")]
    DuplicateKeyword(&'static str),
    #[error("unsupported keyword '{0}'")]
    UnsupportedKeyword(String),
    #[error("unexpected content: {0}")]
    UnexpectedContent(String),
}

/// Structural error in a catalog file, reported with its 1-based line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// A source file whose grammar scan failed (e.g. unbalanced quotes).
///
/// The file contributes no occurrences; the rest of the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl ScanError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Requested locale code is not in the locale registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale '{0}' (run with a code such as 'ar', 'fr' or 'pt_BR')")]
pub struct UnknownLocale(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(12, ParseErrorKind::UnterminatedString);
        assert_eq!(err.to_string(), "line 12: unterminated quoted string");

        let err = ParseError::new(3, ParseErrorKind::InvalidEscape('q'));
        assert_eq!(err.to_string(), "line 3: invalid escape sequence '\\q'");
    }

    #[test]
    fn test_unknown_locale_display() {
        let err = UnknownLocale("xx".to_string());
        assert!(err.to_string().starts_with("unknown locale 'xx'"));
    }
}
