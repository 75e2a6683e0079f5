use super::{
    CallGrammar, CallName, FileScan, Scan, collect_calls,
    lexer::{Dialect, tokenize},
};
use crate::core::{
    data::{CallShape, OccurrenceKind},
    error::ScanError,
};

const SCRIPT_CALLS: CallGrammar = CallGrammar {
    names: &[
        CallName {
            name: "_t",
            shape: CallShape::Strict,
        },
        CallName {
            name: "_lt",
            shape: CallShape::Lazy,
        },
    ],
    definition_keyword: "function",
    kind: OccurrenceKind::ScriptCall,
};

/// Scanner for `_t('...')` and `_lt('...')` in JavaScript sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptScanner;

impl Scan for ScriptScanner {
    fn scan(&self, text: &str, file_path: &str) -> Result<FileScan, ScanError> {
        let tokens = tokenize(text, Dialect::Script)?;
        Ok(collect_calls(&tokens, text, file_path, &SCRIPT_CALLS))
    }
}
