//! SNBT text parser

use std::path::Path;

use indexmap::IndexMap;

use super::document::SnbtValue;
use crate::error::{Error, Result};

/// Read and parse an SNBT file.
///
/// A leading UTF-8 BOM is ignored.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid SNBT.
pub fn read_snbt<P: AsRef<Path>>(path: P) -> Result<SnbtValue> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
    parse_snbt(&content)
}

/// Parse SNBT text into a value tree.
///
/// The whole input must be a single value, optionally surrounded by whitespace.
///
/// # Errors
/// Returns [`Error::SnbtParse`] with the line and column of the first problem.
pub fn parse_snbt(content: &str) -> Result<SnbtValue> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parser = Parser::new(content);
    parser.skip_trivia();
    let value = parser.parse_value()?;
    parser.skip_trivia();
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing character '{c}'")));
    }
    Ok(value)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::SnbtParse {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Skip whitespace (including newlines).
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Skip separators between entries: any mix of whitespace and at most one comma.
    fn skip_separator(&mut self) {
        self.skip_trivia();
        if self.peek() == Some(',') {
            self.bump();
            self.skip_trivia();
        }
    }

    fn parse_value(&mut self) -> Result<SnbtValue> {
        match self.peek() {
            Some('{') => self.parse_compound(),
            Some('[') => self.parse_list(),
            Some(q @ ('"' | '\'')) => Ok(SnbtValue::String(self.parse_quoted(q)?)),
            Some(_) => {
                let token = self.parse_bare()?;
                Ok(SnbtValue::Literal(token))
            }
            None => Err(self.error("unexpected end of input, expected a value")),
        }
    }

    fn parse_compound(&mut self) -> Result<SnbtValue> {
        self.expect('{')?;
        let mut map = IndexMap::new();
        self.skip_trivia();

        loop {
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(SnbtValue::Compound(map));
                }
                None => return Err(self.error("unterminated compound, expected '}'")),
                _ => {}
            }

            let key = match self.peek() {
                Some(q @ ('"' | '\'')) => self.parse_quoted(q)?,
                _ => self.parse_bare()?,
            };
            self.skip_trivia();
            self.expect(':')?;
            self.skip_trivia();
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_separator();
        }
    }

    fn parse_list(&mut self) -> Result<SnbtValue> {
        self.expect('[')?;
        self.skip_trivia();

        if let Some(kind) = self.typed_array_prefix() {
            return self.parse_typed_array(kind);
        }

        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(SnbtValue::List(items));
                }
                None => return Err(self.error("unterminated list, expected ']'")),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_separator();
        }
    }

    /// Detect `B;`, `I;` or `L;` right after an opening bracket.
    fn typed_array_prefix(&mut self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        let kind = lookahead.next()?;
        if matches!(kind, 'B' | 'I' | 'L') && lookahead.next() == Some(';') {
            self.bump();
            self.bump();
            Some(kind)
        } else {
            None
        }
    }

    fn parse_typed_array(&mut self, kind: char) -> Result<SnbtValue> {
        let mut items = Vec::new();
        self.skip_trivia();
        loop {
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(SnbtValue::TypedArray { kind, items });
                }
                None => return Err(self.error("unterminated typed array, expected ']'")),
                _ => {}
            }
            items.push(self.parse_bare()?);
            self.skip_separator();
        }
    }

    /// Parse a quoted string, returning its raw contents in double-quote form.
    ///
    /// Escape sequences are copied through untouched. Inside single quotes an
    /// unescaped `"` gets a backslash and `\'` loses its backslash, so the
    /// result always reads the same when written back between double quotes.
    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        let (start_line, start_column) = (self.line, self.column);
        self.bump();
        let mut raw = String::new();

        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('\'') if quote == '\'' => raw.push('\''),
                    Some(c) => {
                        raw.push('\\');
                        raw.push(c);
                    }
                    None => break,
                },
                Some('"') if quote == '\'' => raw.push_str("\\\""),
                Some(c) if c == quote => return Ok(raw),
                Some(c) => raw.push(c),
                None => break,
            }
        }

        Err(Error::SnbtParse {
            line: start_line,
            column: start_column,
            message: "unterminated string".to_string(),
        })
    }

    /// Parse an unquoted token (bare key, number, boolean).
    fn parse_bare(&mut self) -> Result<String> {
        let mut token = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | ':' | '{' | '}' | '[' | ']' | '"' | '\'') {
                break;
            }
            token.push(c);
            self.bump();
        }

        if token.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("unexpected character '{c}'")),
                None => self.error("unexpected end of input"),
            });
        }
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ftb_layout() {
        let text = "{\n\tchapter.01AB.title: \"Start\"\n\tquest.02CD.quest_desc: [\n\t\t\"One\"\n\t\t\"Two\"\n\t]\n}\n";
        let value = parse_snbt(text).unwrap();

        assert_eq!(value.get_str("chapter.01AB.title"), Some("Start"));
        let lines = value.get_list("quest.02CD.quest_desc");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].as_str(), Some("Two"));
    }

    #[test]
    fn test_parse_commas_and_trailing_comma() {
        let value = parse_snbt("{a: 1b, \"b c\": [1, 2, 3,], d: true,}").unwrap();
        let map = value.as_compound().unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map["a"], SnbtValue::Literal("1b".to_string()));
        assert_eq!(map["b c"].as_list().unwrap().len(), 3);
        assert_eq!(map["d"], SnbtValue::Literal("true".to_string()));
    }

    #[test]
    fn test_strings_stay_raw() {
        let value = parse_snbt(r#"{k: "say \"hi\" \\o/"}"#).unwrap();
        assert_eq!(value.get_str("k"), Some(r#"say \"hi\" \\o/"#));
    }

    #[test]
    fn test_single_quoted_normalised() {
        let value = parse_snbt(r#"{k: 'it\'s "ok"'}"#).unwrap();
        assert_eq!(value.get_str("k"), Some(r#"it's \"ok\""#));
    }

    #[test]
    fn test_typed_array() {
        let value = parse_snbt("{ids: [I; 1, -2, 3]}").unwrap();
        assert_eq!(
            value.get("ids"),
            Some(&SnbtValue::TypedArray {
                kind: 'I',
                items: vec!["1".to_string(), "-2".to_string(), "3".to_string()],
            })
        );
    }

    #[test]
    fn test_error_position() {
        let err = parse_snbt("{\n\ta: \"x\"\n\tb \"y\"\n}").unwrap_err();
        match err {
            Error::SnbtParse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(
            parse_snbt("{a: \"open"),
            Err(Error::SnbtParse { line: 1, column: 5, .. })
        ));
    }

    #[test]
    fn test_bom_is_ignored() {
        let value = parse_snbt("\u{feff}{a: \"b\"}").unwrap();
        assert_eq!(value.get_str("a"), Some("b"));
    }
}
