use std::fmt;

/// A tag on a catalog entry.
///
/// `Obsolete` is never written on the `#,` line; obsolete entries are
/// serialized with every line prefixed `#~` instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// Translation exists but needs human review.
    Fuzzy,
    /// Key is no longer present in the scanned source.
    Obsolete,
    /// Placeholder-consistency checks apply (`python-format` -> `Format("python")`).
    Format(String),
    /// Any other flag, kept verbatim (`no-python-format`, `range: 1..5`).
    Other(String),
}

impl Flag {
    pub fn python_format() -> Self {
        Flag::Format("python".to_string())
    }

    /// Parse one comma-separated token of a `#,` line.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token == "fuzzy" {
            return Flag::Fuzzy;
        }
        match token.strip_suffix("-format") {
            Some(kind) if !kind.is_empty() && !kind.starts_with("no-") => {
                Flag::Format(kind.to_string())
            }
            _ => Flag::Other(token.to_string()),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Fuzzy => write!(f, "fuzzy"),
            Flag::Obsolete => write!(f, "obsolete"),
            Flag::Format(kind) => write!(f, "{}-format", kind),
            Flag::Other(raw) => write!(f, "{}", raw),
        }
    }
}
