use std::fmt;

/// Position of a translatable string in a module's source files.
///
/// `file_path` is relative to the module root and always uses `/` separators,
/// so catalogs written on different platforms stay identical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub file_path: String,
    /// Line number (1-indexed). 0 means the reference carried no line.
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }

    /// Parse a `#:` reference token such as `models/sale.py:42`.
    ///
    /// A token without a numeric `:line` suffix is kept as a file-only
    /// reference with line 0.
    pub fn parse(token: &str) -> Self {
        match token.rsplit_once(':') {
            Some((path, line)) if !path.is_empty() => match line.parse::<usize>() {
                Ok(line) => Self::new(path, line),
                Err(_) => Self::new(token, 0),
            },
            _ => Self::new(token, 0),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file_path)
        } else {
            write!(f, "{}:{}", self.file_path, self.line)
        }
    }
}
