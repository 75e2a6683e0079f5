//! Issue types produced by scanning, parsing and validation.
//!
//! Every issue is self-contained: it carries everything the CLI needs to
//! print it (location, message, severity, rule id) and is never mutated
//! after creation.

use std::fmt;

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::core::{
    data::{NonLiteralCall, SourceLocation},
    error::{ParseError, ScanError},
};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Rule identifier for each kind of issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    HeaderField,
    LanguageMismatch,
    Bom,
    Mojibake,
    ReplacementChar,
    PlaceholderCount,
    PlaceholderNamed,
    PlaceholderOrder,
    PluralForms,
    Fuzzy,
    Untranslated,
    DuplicateKey,
    BidiOverride,
    DirectionMark,
    RtlScript,
    Whitespace,
    NonLiteralCall,
    ScanError,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Rule::HeaderField => "header-field",
            Rule::LanguageMismatch => "language-mismatch",
            Rule::Bom => "bom",
            Rule::Mojibake => "mojibake",
            Rule::ReplacementChar => "replacement-char",
            Rule::PlaceholderCount => "placeholder-count",
            Rule::PlaceholderNamed => "placeholder-named",
            Rule::PlaceholderOrder => "placeholder-order",
            Rule::PluralForms => "plural-forms",
            Rule::Fuzzy => "fuzzy",
            Rule::Untranslated => "untranslated",
            Rule::DuplicateKey => "duplicate-key",
            Rule::BidiOverride => "bidi-override",
            Rule::DirectionMark => "direction-mark",
            Rule::RtlScript => "rtl-script",
            Rule::Whitespace => "whitespace",
            Rule::NonLiteralCall => "non-literal-call",
            Rule::ScanError => "scan-error",
            Rule::ParseError => "parse-error",
        };
        f.write_str(id)
    }
}

impl Serialize for Rule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A validation finding about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub rule: Rule,
    /// Entry key, or `None` for catalog-level findings.
    pub key: Option<String>,
    pub message: String,
    /// Catalog file and entry line, when known.
    pub location: Option<SourceLocation>,
}

impl Finding {
    pub fn new(severity: Severity, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule,
            key: None,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn at(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

/// A translation call whose argument is not a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonLiteralCallIssue {
    pub call: NonLiteralCall,
}

impl NonLiteralCallIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NonLiteralCall
    }
}

/// A source file whose scan failed; it contributed no strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanErrorIssue {
    pub file_path: String,
    /// `None` when the file could not be read at all.
    pub line: Option<usize>,
    pub error: String,
}

impl ScanErrorIssue {
    pub fn from_scan_error(file_path: impl Into<String>, error: &ScanError) -> Self {
        Self {
            file_path: file_path.into(),
            line: Some(error.line),
            error: error.message.clone(),
        }
    }

    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ScanError
    }
}

/// A catalog file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub line: usize,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn from_parse_error(file_path: impl Into<String>, error: &ParseError) -> Self {
        Self {
            file_path: file_path.into(),
            line: error.line,
            error: error.kind.to_string(),
        }
    }

    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Finding(Finding),
    NonLiteralCall(NonLiteralCallIssue),
    ScanError(ScanErrorIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub struct ReportLocation<'a> {
    pub file_path: &'a str,
    /// 0 when the issue has no line.
    pub line: usize,
    /// Source line to show under the location, if any.
    pub source_line: Option<&'a str>,
}

/// Trait for types that can be reported to the CLI.
///
/// Uses `enum_dispatch` for static dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// File (and line) the issue points at; `None` for catalog-wide issues
    /// with no file.
    fn location(&self) -> Option<ReportLocation<'_>>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for Finding {
    fn location(&self) -> Option<ReportLocation<'_>> {
        self.location.as_ref().map(|loc| ReportLocation {
            file_path: &loc.file_path,
            line: loc.line,
            source_line: None,
        })
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        self.severity
    }

    fn report_rule(&self) -> Rule {
        self.rule
    }

    fn details(&self) -> Option<String> {
        self.key.as_ref().map(|key| format!("msgid \"{}\"", key))
    }
}

impl Report for NonLiteralCallIssue {
    fn location(&self) -> Option<ReportLocation<'_>> {
        Some(ReportLocation {
            file_path: &self.call.location.file_path,
            line: self.call.location.line,
            source_line: Some(&self.call.source_line),
        })
    }

    fn message(&self) -> String {
        format!("{}() called with a {}", self.call.callee, self.call.reason)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("only literal strings can be extracted; this text is missing from the catalog".to_string())
    }
}

impl Report for ScanErrorIssue {
    fn location(&self) -> Option<ReportLocation<'_>> {
        Some(ReportLocation {
            file_path: &self.file_path,
            line: self.line.unwrap_or(0),
            source_line: None,
        })
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> Option<ReportLocation<'_>> {
        Some(ReportLocation {
            file_path: &self.file_path,
            line: self.line,
            source_line: None,
        })
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Sort by: file_path (catalog-wide first), line, severity, rule, message
        let key = |issue: &Issue| {
            issue
                .location()
                .map(|loc| (loc.file_path.to_string(), loc.line))
        };
        match (key(self), key(other)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.severity().cmp(&other.severity()))
        .then_with(|| self.rule().cmp(&other.rule()))
        .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use crate::core::data::NonLiteralReason;
    use crate::core::error::ParseErrorKind;
    use crate::issues::*;

    #[test]
    fn test_rule_ids() {
        assert_eq!(Rule::PlaceholderCount.to_string(), "placeholder-count");
        assert_eq!(Rule::PluralForms.to_string(), "plural-forms");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
        assert_eq!(
            serde_json::to_string(&Rule::DuplicateKey).unwrap(),
            "\"duplicate-key\""
        );
    }

    #[test]
    fn test_finding_builder() {
        let finding = Finding::new(Severity::Warning, Rule::Fuzzy, "needs review")
            .with_key("Save")
            .at(Some(SourceLocation::new("i18n/fr.po", 12)));
        let issue = Issue::Finding(finding);
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.details().as_deref(), Some("msgid \"Save\""));
        assert_eq!(issue.location().map(|l| l.line), Some(12));
    }

    #[test]
    fn test_non_literal_message() {
        let issue = Issue::NonLiteralCall(NonLiteralCallIssue {
            call: NonLiteralCall {
                location: SourceLocation::new("models/a.py", 4),
                callee: "_".to_string(),
                reason: NonLiteralReason::Identifier,
                source_line: "_(label)".to_string(),
            },
        });
        assert_eq!(issue.message(), "_() called with a variable argument");
        assert_eq!(issue.rule(), Rule::NonLiteralCall);
    }

    #[test]
    fn test_parse_error_issue() {
        let err = ParseError::new(7, ParseErrorKind::MissingSeparator);
        let issue = ParseErrorIssue::from_parse_error("i18n/ar.po", &err);
        assert_eq!(issue.line, 7);
        assert_eq!(issue.error, "missing blank line between entries");
    }

    #[test]
    fn test_issue_ordering() {
        let at = |line| {
            Issue::Finding(
                Finding::new(Severity::Warning, Rule::Fuzzy, "x")
                    .at(Some(SourceLocation::new("fr.po", line))),
            )
        };
        let catalog_wide = Issue::Finding(Finding::new(Severity::Error, Rule::HeaderField, "h"));
        let mut issues = vec![at(20), at(3), catalog_wide.clone()];
        issues.sort();
        assert_eq!(issues[0], catalog_wide);
        assert_eq!(issues[1], at(3));
    }
}
