use std::fmt;

use serde::Serialize;

use super::SourceLocation;

/// Which of the two translation call shapes matched.
///
/// - `Strict`: translated immediately (`_('...')`, `_t('...')`)
/// - `Lazy`: translated when rendered (`_lt('...')`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    Strict,
    Lazy,
}

/// Syntactic position an extracted string came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OccurrenceKind {
    /// First argument of a translation call in imperative-language source.
    ImperativeCall(CallShape),
    /// First argument of a translation call in script source.
    ScriptCall(CallShape),
    /// Value of a translatable markup attribute (attribute name kept).
    MarkupAttribute(String),
    /// Text content of a human-facing markup element.
    MarkupText,
}

impl OccurrenceKind {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            OccurrenceKind::ImperativeCall(_) => SourceKind::ImperativeCall,
            OccurrenceKind::ScriptCall(_) => SourceKind::ScriptCall,
            OccurrenceKind::MarkupAttribute(_) => SourceKind::MarkupAttribute,
            OccurrenceKind::MarkupText => SourceKind::MarkupText,
        }
    }
}

/// Reporting group for a catalog entry, derived from its occurrence kind.
///
/// Declaration order is the order groups are printed in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    ImperativeCall,
    MarkupAttribute,
    MarkupText,
    ScriptCall,
    Other,
}

impl SourceKind {
    pub fn all() -> [SourceKind; 5] {
        [
            SourceKind::ImperativeCall,
            SourceKind::MarkupAttribute,
            SourceKind::MarkupText,
            SourceKind::ScriptCall,
            SourceKind::Other,
        ]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::ImperativeCall => write!(f, "imperative-call"),
            SourceKind::MarkupAttribute => write!(f, "markup-attribute"),
            SourceKind::MarkupText => write!(f, "markup-text"),
            SourceKind::ScriptCall => write!(f, "script-call"),
            SourceKind::Other => write!(f, "other"),
        }
    }
}

/// One extracted string at one source position.
///
/// Transient: produced by a scanner, folded into a catalog by `build_catalog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub text: String,
    pub location: SourceLocation,
    pub kind: OccurrenceKind,
}

impl Occurrence {
    pub fn new(text: impl Into<String>, location: SourceLocation, kind: OccurrenceKind) -> Self {
        Self {
            text: text.into(),
            location,
            kind,
        }
    }
}

/// Why a translation call's first argument could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonLiteralReason {
    /// `_(label)`
    Identifier,
    /// `_(f'...')` or a template literal with `${...}`
    FormattedString,
    /// `_('a' + b)`, `_('%s' % x)`, `_('x'.upper())`
    Expression,
    /// `_()`
    MissingArgument,
}

impl fmt::Display for NonLiteralReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonLiteralReason::Identifier => write!(f, "variable argument"),
            NonLiteralReason::FormattedString => write!(f, "formatted string argument"),
            NonLiteralReason::Expression => write!(f, "expression argument"),
            NonLiteralReason::MissingArgument => write!(f, "missing argument"),
        }
    }
}

/// A translation call site whose first argument is not a plain literal.
///
/// These are reported rather than silently dropped, since they hide
/// strings from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonLiteralCall {
    pub location: SourceLocation,
    /// Name of the translation function (`_`, `_lt`, `_t`).
    pub callee: String,
    pub reason: NonLiteralReason,
    /// The source line containing the call, trimmed.
    pub source_line: String,
}
