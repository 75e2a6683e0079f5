//! Source scanners.
//!
//! One scanner per host grammar, selected by file extension. Each scanner is
//! a pure function of a single file's text: no scanner looks at another
//! file, so files can be scanned in any order or in parallel.
//!
//! ## Module Structure
//!
//! - `lexer`: comment/string aware tokenizer shared by the call scanners
//! - `python`: `_('...')` / `_lt('...')` calls
//! - `js`: `_t('...')` / `_lt('...')` calls
//! - `xml`: translatable attributes and text content of view markup

pub mod js;
pub mod lexer;
pub mod python;
pub mod xml;

use std::path::Path;
use std::sync::Arc;

use enum_dispatch::enum_dispatch;

pub use js::ScriptScanner;
pub use python::PythonScanner;
pub use xml::{MarkupRules, MarkupScanner};

use crate::core::{
    data::{CallShape, NonLiteralCall, NonLiteralReason, Occurrence, OccurrenceKind, SourceLocation},
    error::ScanError,
};
use lexer::{Token, TokenKind};

/// Everything one file contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    pub occurrences: Vec<Occurrence>,
    /// Call sites whose argument could not be extracted.
    pub non_literal: Vec<NonLiteralCall>,
}

#[enum_dispatch]
pub trait Scan {
    /// Scan one file. `file_path` is the module-relative path recorded in
    /// every location.
    fn scan(&self, text: &str, file_path: &str) -> Result<FileScan, ScanError>;
}

#[enum_dispatch(Scan)]
#[derive(Debug, Clone)]
pub enum Scanner {
    Python(PythonScanner),
    Markup(MarkupScanner),
    Script(ScriptScanner),
}

impl Scanner {
    /// Pick the scanner for a file by extension; `None` for files no
    /// scanner understands.
    pub fn for_path(path: &Path, markup: &Arc<MarkupRules>) -> Option<Scanner> {
        match path.extension().and_then(|e| e.to_str())? {
            "py" => Some(PythonScanner.into()),
            "xml" => Some(MarkupScanner::new(Arc::clone(markup)).into()),
            "js" => Some(ScriptScanner.into()),
            _ => None,
        }
    }
}

/// A translation function recognised by a call scanner.
pub(crate) struct CallName {
    pub name: &'static str,
    pub shape: CallShape,
}

/// Grammar-specific knobs for [`collect_calls`].
pub(crate) struct CallGrammar {
    pub names: &'static [CallName],
    /// Keyword that introduces a function definition (`def`, `function`);
    /// `def _(...)` is not a call site.
    pub definition_keyword: &'static str,
    pub kind: fn(CallShape) -> OccurrenceKind,
}

enum Argument {
    Literal { value: String, line: usize },
    NonLiteral(NonLiteralReason),
}

/// Find translation calls in a token stream.
///
/// A call is an identifier from `grammar.names` (bare or after `.`)
/// directly followed by `(`. Its first argument is extracted only when it
/// is one or more adjacent plain string literals ending at `,` or `)`.
pub(crate) fn collect_calls(
    tokens: &[Token],
    text: &str,
    file_path: &str,
    grammar: &CallGrammar,
) -> FileScan {
    let mut scan = FileScan::default();

    for (i, token) in tokens.iter().enumerate() {
        let TokenKind::Ident(ident) = &token.kind else {
            continue;
        };
        let Some(call) = grammar.names.iter().find(|c| c.name == ident.as_str()) else {
            continue;
        };
        if !matches!(tokens.get(i + 1).map(|t| &t.kind), Some(TokenKind::Punct('('))) {
            continue;
        }
        if i > 0
            && matches!(&tokens[i - 1].kind, TokenKind::Ident(kw) if kw == grammar.definition_keyword)
        {
            continue;
        }

        match classify_argument(&tokens[i + 2..]) {
            Argument::Literal { value, line } => {
                if value.trim().is_empty() {
                    continue;
                }
                scan.occurrences.push(Occurrence::new(
                    value,
                    SourceLocation::new(file_path, line),
                    (grammar.kind)(call.shape),
                ));
            }
            Argument::NonLiteral(reason) => scan.non_literal.push(NonLiteralCall {
                location: SourceLocation::new(file_path, token.line),
                callee: call.name.to_string(),
                reason,
                source_line: source_line(text, token.line),
            }),
        }
    }

    scan
}

fn classify_argument(rest: &[Token]) -> Argument {
    let mut value = String::new();
    let mut first_line = None;
    let mut interpolated = false;
    let mut idx = 0;

    while let Some(Token {
        kind: TokenKind::Str(literal),
        line,
    }) = rest.get(idx)
    {
        first_line.get_or_insert(*line);
        value.push_str(&literal.value);
        interpolated |= literal.interpolated;
        idx += 1;
    }

    let terminated = |at: usize| {
        matches!(
            rest.get(at).map(|t| &t.kind),
            Some(TokenKind::Punct(',' | ')'))
        )
    };

    match first_line {
        Some(_) if interpolated => Argument::NonLiteral(NonLiteralReason::FormattedString),
        Some(line) if terminated(idx) => Argument::Literal { value, line },
        Some(_) => Argument::NonLiteral(NonLiteralReason::Expression),
        None => match rest.first().map(|t| &t.kind) {
            None | Some(TokenKind::Punct(')')) => {
                Argument::NonLiteral(NonLiteralReason::MissingArgument)
            }
            Some(TokenKind::Ident(_)) => {
                // Dotted names (`self.label`) are still plain variables.
                let mut end = 1;
                while matches!(rest.get(end).map(|t| &t.kind), Some(TokenKind::Punct('.')))
                    && matches!(rest.get(end + 1).map(|t| &t.kind), Some(TokenKind::Ident(_)))
                {
                    end += 2;
                }
                if terminated(end) {
                    Argument::NonLiteral(NonLiteralReason::Identifier)
                } else {
                    Argument::NonLiteral(NonLiteralReason::Expression)
                }
            }
            Some(_) => Argument::NonLiteral(NonLiteralReason::Expression),
        },
    }
}

fn source_line(text: &str, line: usize) -> String {
    text.lines()
        .nth(line.saturating_sub(1))
        .map(|l| l.trim().to_string())
        .unwrap_or_default()
}
