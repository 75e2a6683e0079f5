use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use super::Flag;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)charset\s*=\s*([^\s;]+)").unwrap());
static NPLURALS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nplurals\s*=\s*(\d+)").unwrap());
static PLURAL_EXPR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"plural\s*=\s*([^;]+);?").unwrap());

/// Parsed `Plural-Forms` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForms {
    pub nplurals: usize,
    pub expression: Option<String>,
}

impl PluralForms {
    /// Parse `nplurals=<N>; plural=<expr>;`. Returns `None` without `nplurals`.
    pub fn parse(value: &str) -> Option<Self> {
        let nplurals = NPLURALS_REGEX
            .captures(value)
            .and_then(|c| c[1].parse::<usize>().ok())?;
        let expression = PLURAL_EXPR_REGEX
            .captures_iter(value)
            .map(|c| c[1].trim().to_string())
            .find(|expr| !expr.is_empty());
        Some(Self {
            nplurals,
            expression,
        })
    }
}

/// Catalog metadata: the empty-key entry whose translation holds
/// `Name: value` lines.
#[derive(Debug, Clone, Default)]
pub struct Header {
    /// Comment lines above the header entry, kept verbatim (including `#`).
    pub comments: Vec<String>,
    pub flags: BTreeSet<Flag>,
    /// Ordered `(name, value)` pairs.
    pub fields: Vec<(String, String)>,
    /// Line of the header's `msgid` in the file it was read from.
    pub line: Option<usize>,
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.comments == other.comments && self.flags == other.flags && self.fields == other.fields
    }
}

impl Eq for Header {}

impl Header {
    /// Standard header for a freshly extracted catalog.
    ///
    /// `language` and `plural_forms` are `None` for templates.
    pub fn new(project: &str, language: Option<&str>, plural_forms: Option<&str>) -> Self {
        let mut header = Header::default();
        header.set("Project-Id-Version", project);
        if let Some(language) = language {
            header.set("Language", language);
        }
        header.set("MIME-Version", "1.0");
        header.set("Content-Type", "text/plain; charset=UTF-8");
        header.set("Content-Transfer-Encoding", "8bit");
        if let Some(plural_forms) = plural_forms {
            header.set("Plural-Forms", plural_forms);
        }
        header
    }

    /// Build from the header entry's decoded translation text.
    pub fn from_msgstr(text: &str) -> Self {
        let fields = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once(':') {
                Some((name, value)) => (name.trim().to_string(), value.trim().to_string()),
                None => (line.trim().to_string(), String::new()),
            })
            .collect();
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Render the fields back into the header entry's translation text.
    pub fn to_msgstr(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}: {}\n", name, value))
            .collect()
    }

    /// Case-insensitive field lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace the field's value, or append the field if absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Declared language code, if present and non-empty.
    pub fn language(&self) -> Option<&str> {
        self.get("Language").filter(|v| !v.is_empty())
    }

    /// Charset declared in `Content-Type`, lowercased.
    pub fn charset(&self) -> Option<String> {
        let content_type = self.get("Content-Type")?;
        CHARSET_REGEX
            .captures(content_type)
            .map(|c| c[1].trim_matches('"').to_ascii_lowercase())
    }

    pub fn plural_forms(&self) -> Option<PluralForms> {
        self.get("Plural-Forms").and_then(PluralForms::parse)
    }
}
