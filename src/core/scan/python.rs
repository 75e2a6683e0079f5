use super::{
    CallGrammar, CallName, FileScan, Scan, collect_calls,
    lexer::{Dialect, tokenize},
};
use crate::core::{
    data::{CallShape, OccurrenceKind},
    error::ScanError,
};

const PYTHON_CALLS: CallGrammar = CallGrammar {
    names: &[
        CallName {
            name: "_",
            shape: CallShape::Strict,
        },
        CallName {
            name: "_lt",
            shape: CallShape::Lazy,
        },
    ],
    definition_keyword: "def",
    kind: OccurrenceKind::ImperativeCall,
};

/// Scanner for `_('...')` and `_lt('...')` in Python modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonScanner;

impl Scan for PythonScanner {
    fn scan(&self, text: &str, file_path: &str) -> Result<FileScan, ScanError> {
        let tokens = tokenize(text, Dialect::Python)?;
        Ok(collect_calls(&tokens, text, file_path, &PYTHON_CALLS))
    }
}
