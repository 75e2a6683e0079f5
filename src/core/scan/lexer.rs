//! Token-level scanning shared by the call-site scanners.
//!
//! This is not a parser for either language. It only knows enough about
//! comments, string literals and identifiers to find translation call sites
//! without being fooled by quotes inside comments or parentheses inside
//! strings.

use crate::core::error::ScanError;

/// Which host grammar the lexer follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `#` comments, string prefixes (`r`, `b`, `u`, `f`), triple quotes.
    Python,
    /// `//` and `/* */` comments, template literals, regex literals.
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// Decoded value with escapes resolved.
    pub value: String,
    /// f-string, or template literal containing `${...}`.
    pub interpolated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    Str(StringLiteral),
    Punct(char),
    /// Numbers and regex literals.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based line where the token begins.
    pub line: usize,
}

const PYTHON_STRING_PREFIXES: &[&str] = &["r", "u", "b", "f", "rb", "br", "fr", "rf"];

/// Keywords after which a `/` starts a regex literal rather than a division.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "case", "do", "else", "in", "of", "new", "delete", "void", "throw",
    "yield", "await",
];

pub fn tokenize(text: &str, dialect: Dialect) -> Result<Vec<Token>, ScanError> {
    let mut lexer = Lexer {
        text,
        pos: 0,
        line: 1,
        dialect,
        tokens: Vec::new(),
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
    dialect: Dialect,
    tokens: Vec<Token>,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.text[self.pos..].chars().nth(1)
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.text[self.pos..].starts_with(pattern)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token { kind, line });
    }

    fn run(&mut self) -> Result<(), ScanError> {
        while let Some(c) = self.peek() {
            let line = self.line;
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' if self.dialect == Dialect::Python => self.skip_line(),
                '/' if self.dialect == Dialect::Script && self.starts_with("//") => {
                    self.skip_line()
                }
                '/' if self.dialect == Dialect::Script && self.starts_with("/*") => {
                    self.skip_block_comment(line)?
                }
                '/' if self.dialect == Dialect::Script && self.regex_allowed() => {
                    self.skip_regex(line)?;
                    self.push(TokenKind::Other, line);
                }
                '\'' | '"' => {
                    let literal = match self.dialect {
                        Dialect::Python => self.python_string("", line)?,
                        Dialect::Script => self.script_string(line)?,
                    };
                    self.push(TokenKind::Str(literal), line);
                }
                '`' if self.dialect == Dialect::Script => {
                    let literal = self.template_literal(line)?;
                    self.push(TokenKind::Str(literal), line);
                }
                c if is_ident_start(c, self.dialect) => {
                    let ident = self.ident();
                    let prefixed_string = self.dialect == Dialect::Python
                        && matches!(self.peek(), Some('\'' | '"'))
                        && PYTHON_STRING_PREFIXES.contains(&ident.to_ascii_lowercase().as_str());
                    if prefixed_string {
                        let literal = self.python_string(&ident.to_ascii_lowercase(), line)?;
                        self.push(TokenKind::Str(literal), line);
                    } else {
                        self.push(TokenKind::Ident(ident), line);
                    }
                }
                c if c.is_ascii_digit() => {
                    while self
                        .peek()
                        .is_some_and(|c| c.is_alphanumeric() || c == '.' || c == '_')
                    {
                        self.bump();
                    }
                    self.push(TokenKind::Other, line);
                }
                c => {
                    self.bump();
                    self.push(TokenKind::Punct(c), line);
                }
            }
        }
        Ok(())
    }

    fn ident(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| is_ident_continue(c, self.dialect)) {
            self.bump();
        }
        self.text[start..self.pos].to_string()
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self, line: usize) -> Result<(), ScanError> {
        self.bump();
        self.bump();
        while !self.starts_with("*/") {
            if self.bump().is_none() {
                return Err(ScanError::new(line, "unterminated block comment"));
            }
        }
        self.bump();
        self.bump();
        Ok(())
    }

    fn regex_allowed(&self) -> bool {
        match self.tokens.last().map(|t| &t.kind) {
            None => true,
            Some(TokenKind::Punct(c)) => "(,=:[!&|?{};+-*%<>~^".contains(*c),
            Some(TokenKind::Ident(word)) => REGEX_PRECEDING_KEYWORDS.contains(&word.as_str()),
            Some(_) => false,
        }
    }

    fn skip_regex(&mut self, line: usize) -> Result<(), ScanError> {
        self.bump();
        let mut in_class = false;
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(ScanError::new(line, "unterminated regular expression literal"));
                }
                Some('\\') => {
                    self.bump();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        Ok(())
    }

    fn python_string(&mut self, prefix: &str, line: usize) -> Result<StringLiteral, ScanError> {
        let raw = prefix.contains('r');
        let interpolated = prefix.contains('f');
        let Some(quote) = self.bump() else {
            return Err(unterminated(line));
        };
        let triple = self.peek() == Some(quote) && self.peek_second() == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        let mut value = String::new();
        loop {
            let c = self.bump().ok_or_else(|| unterminated(line))?;
            match c {
                '\\' => {
                    let next = self.bump().ok_or_else(|| unterminated(line))?;
                    if raw {
                        value.push('\\');
                        value.push(next);
                    } else {
                        self.unescape_into(next, &mut value);
                    }
                }
                c if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_second() == Some(quote) {
                        self.bump();
                        self.bump();
                        break;
                    }
                    value.push(c);
                }
                '\n' if !triple => return Err(unterminated(line)),
                c => value.push(c),
            }
        }
        Ok(StringLiteral {
            value,
            interpolated,
        })
    }

    fn script_string(&mut self, line: usize) -> Result<StringLiteral, ScanError> {
        let Some(quote) = self.bump() else {
            return Err(unterminated(line));
        };
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated(line)),
                Some('\\') => {
                    let next = self.bump().ok_or_else(|| unterminated(line))?;
                    self.unescape_into(next, &mut value);
                }
                Some(c) if c == quote => break,
                Some(c) => value.push(c),
            }
        }
        Ok(StringLiteral {
            value,
            interpolated: false,
        })
    }

    fn template_literal(&mut self, line: usize) -> Result<StringLiteral, ScanError> {
        self.bump();
        let mut value = String::new();
        let mut interpolated = false;
        loop {
            match self.bump() {
                None => return Err(unterminated(line)),
                Some('\\') => {
                    let next = self.bump().ok_or_else(|| unterminated(line))?;
                    self.unescape_into(next, &mut value);
                }
                Some('`') => break,
                Some('$') if self.peek() == Some('{') => {
                    self.bump();
                    interpolated = true;
                    self.skip_substitution(line)?;
                }
                Some(c) => value.push(c),
            }
        }
        Ok(StringLiteral {
            value,
            interpolated,
        })
    }

    /// Skip a `${...}` body, including nested braces and strings.
    fn skip_substitution(&mut self, line: usize) -> Result<(), ScanError> {
        let mut depth = 1;
        while depth > 0 {
            match self.peek() {
                None => return Err(unterminated(line)),
                Some('{') => {
                    self.bump();
                    depth += 1;
                }
                Some('}') => {
                    self.bump();
                    depth -= 1;
                }
                Some('\'' | '"') => {
                    let inner = self.line;
                    self.script_string(inner)?;
                }
                Some('`') => {
                    let inner = self.line;
                    self.template_literal(inner)?;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        Ok(())
    }

    fn unescape_into(&mut self, escaped: char, value: &mut String) {
        match escaped {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            '0' => value.push('\0'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            'a' if self.dialect == Dialect::Python => value.push('\u{7}'),
            '\\' | '\'' | '"' | '`' => value.push(escaped),
            // Line continuation.
            '\n' => {}
            'x' => self.hex_escape(2, 'x', value),
            'u' if self.dialect == Dialect::Script && self.peek() == Some('{') => {
                self.braced_unicode_escape(value)
            }
            'u' => self.hex_escape(4, 'u', value),
            'U' if self.dialect == Dialect::Python => self.hex_escape(8, 'U', value),
            other => {
                // Python keeps unknown escapes verbatim; JavaScript drops the backslash.
                if self.dialect == Dialect::Python {
                    value.push('\\');
                }
                value.push(other);
            }
        }
    }

    fn hex_escape(&mut self, digits: usize, marker: char, value: &mut String) {
        let rest = &self.text[self.pos..];
        let candidate: String = rest.chars().take(digits).collect();
        let decoded = (candidate.len() == digits && candidate.chars().all(|c| c.is_ascii_hexdigit()))
            .then(|| u32::from_str_radix(&candidate, 16).ok())
            .flatten()
            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                for _ in 0..digits {
                    self.bump();
                }
                value.push(c);
            }
            None => {
                value.push('\\');
                value.push(marker);
            }
        }
    }

    fn braced_unicode_escape(&mut self, value: &mut String) {
        let rest = &self.text[self.pos..];
        let decoded = rest
            .strip_prefix('{')
            .and_then(|r| r.split_once('}'))
            .and_then(|(hex, _)| u32::from_str_radix(hex, 16).ok().map(|n| (hex.len(), n)))
            .and_then(|(len, n)| char::from_u32(n).map(|c| (len, c)));
        match decoded {
            Some((len, c)) => {
                for _ in 0..len + 2 {
                    self.bump();
                }
                value.push(c);
            }
            None => value.push('u'),
        }
    }
}

fn unterminated(line: usize) -> ScanError {
    ScanError::new(line, "unterminated string literal")
}

fn is_ident_start(c: char, dialect: Dialect) -> bool {
    c.is_alphabetic() || c == '_' || (dialect == Dialect::Script && c == '$')
}

fn is_ident_continue(c: char, dialect: Dialect) -> bool {
    c.is_alphanumeric() || c == '_' || (dialect == Dialect::Script && c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(text: &str, dialect: Dialect) -> Vec<(String, usize)> {
        tokenize(text, dialect)
            .unwrap()
            .into_iter()
            .filter_map(|t| match t.kind {
                TokenKind::Str(lit) => Some((lit.value, t.line)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_python_comments_hide_quotes() {
        let src = "# don't\nx = 'real'\n";
        assert_eq!(strings(src, Dialect::Python), vec![("real".to_string(), 2)]);
    }

    #[test]
    fn test_python_triple_quoted_spans_lines() {
        let src = "a = \"\"\"one\ntwo\"\"\"\nb = 'x'\n";
        assert_eq!(
            strings(src, Dialect::Python),
            vec![("one\ntwo".to_string(), 1), ("x".to_string(), 3)]
        );
    }

    #[test]
    fn test_python_escapes_and_raw() {
        let src = r#"a = 'It\'s\n'; b = r'\d+'; c = 'é'"#;
        assert_eq!(
            strings(src, Dialect::Python),
            vec![
                ("It's\n".to_string(), 1),
                ("\\d+".to_string(), 1),
                ("é".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_python_fstring_is_interpolated() {
        let tokens = tokenize("f'Hello {name}'", Dialect::Python).unwrap();
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Str(StringLiteral { interpolated: true, .. })
        ));
    }

    #[test]
    fn test_unterminated_string_reports_line() {
        let err = tokenize("x = 1\ny = 'open\n", Dialect::Python).unwrap_err();
        assert_eq!(err.line, 2);
        let err = tokenize("const a = \"open;\n", Dialect::Script).unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_script_comments_and_regex() {
        let src = "// it's\n/* \"x\" */ const r = /['\"]/g; const s = 'ok';";
        assert_eq!(strings(src, Dialect::Script), vec![("ok".to_string(), 2)]);
    }

    #[test]
    fn test_division_is_not_regex() {
        let src = "const half = total / 2; const s = 'a/b';";
        assert_eq!(strings(src, Dialect::Script), vec![("a/b".to_string(), 1)]);
    }

    #[test]
    fn test_template_literal_with_substitution() {
        let tokens = tokenize("`Hello ${user.name + '}'} there`", Dialect::Script).unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Str(StringLiteral { interpolated: true, .. })
        ));
        let tokens = tokenize("`plain`", Dialect::Script).unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::Str(StringLiteral {
                value: "plain".to_string(),
                interpolated: false
            })
        );
    }

    #[test]
    fn test_identifiers_and_punctuation() {
        let tokens = tokenize("self.env._lt(", Dialect::Python).unwrap();
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("self".to_string()),
                TokenKind::Punct('.'),
                TokenKind::Ident("env".to_string()),
                TokenKind::Punct('.'),
                TokenKind::Ident("_lt".to_string()),
                TokenKind::Punct('('),
            ]
        );
    }
}
