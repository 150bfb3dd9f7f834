use crate::error::ConditionError;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Ident(String),
    Number(f64),
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Smaller,
    SmallerEqual,
    And,
    Or,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) position: usize,
}

/// Splits a condition into tokens. Any character outside the grammar is rejected.
pub(super) struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            cursor: 0,
        }
    }

    pub(super) fn tokenize(mut self) -> Result<Vec<Token>, ConditionError> {
        let mut tokens = Vec::new();
        while let Some((position, c)) = self.peek() {
            let kind = match c {
                c if c.is_whitespace() => {
                    self.cursor += 1;
                    continue;
                }
                '(' => self.single(TokenKind::LeftParen),
                ')' => self.single(TokenKind::RightParen),
                '<' => self.with_optional_eq(TokenKind::Smaller, TokenKind::SmallerEqual),
                '>' => self.with_optional_eq(TokenKind::Greater, TokenKind::GreaterEqual),
                '=' => self.pair('=', TokenKind::Equal, position)?,
                '!' => self.pair('=', TokenKind::NotEqual, position)?,
                '&' => self.pair('&', TokenKind::And, position)?,
                '|' => self.pair('|', TokenKind::Or, position)?,
                c if c.is_ascii_digit() || c == '.' => self.number(position)?,
                '-' if self.starts_number_after_minus() => self.number(position)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.word(),
                other => {
                    return Err(self.error(position, format!("unexpected character '{}'", other)));
                }
            };
            tokens.push(Token { kind, position });
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.cursor + offset).map(|(_, c)| *c)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor += 1;
        kind
    }

    fn with_optional_eq(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        self.cursor += 1;
        if self.peek_char_at(0) == Some('=') {
            self.cursor += 1;
            with_eq
        } else {
            plain
        }
    }

    /// Two-character operators whose first character is meaningless on its own.
    fn pair(
        &mut self,
        second: char,
        kind: TokenKind,
        position: usize,
    ) -> Result<TokenKind, ConditionError> {
        match self.peek_char_at(1) {
            Some(c) if c == second => {
                self.cursor += 2;
                Ok(kind)
            }
            _ => {
                let first = self.peek_char_at(0).unwrap_or_default();
                Err(self.error(
                    position,
                    format!("expected '{}{}' operator", first, second),
                ))
            }
        }
    }

    fn starts_number_after_minus(&self) -> bool {
        matches!(self.peek_char_at(1), Some(c) if c.is_ascii_digit() || c == '.')
    }

    fn number(&mut self, position: usize) -> Result<TokenKind, ConditionError> {
        let start = self.cursor;
        if self.peek_char_at(0) == Some('-') {
            self.cursor += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while let Some(c) = self.peek_char_at(0) {
            if c.is_ascii_digit() {
                seen_digit = true;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            self.cursor += 1;
        }
        if matches!(self.peek_char_at(0), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.')
        {
            return Err(self.error(position, "malformed numeric literal".to_string()));
        }

        let text = self.slice(start, self.cursor);
        if !seen_digit {
            return Err(self.error(position, format!("malformed numeric literal '{}'", text)));
        }
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| self.error(position, format!("malformed numeric literal '{}'", text)))
    }

    fn word(&mut self) -> TokenKind {
        let start = self.cursor;
        while matches!(self.peek_char_at(0), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.cursor += 1;
        }
        let text = self.slice(start, self.cursor);
        if text.eq_ignore_ascii_case("and") {
            TokenKind::And
        } else if text.eq_ignore_ascii_case("or") {
            TokenKind::Or
        } else {
            TokenKind::Ident(text.to_string())
        }
    }

    /// Byte slice of the source between two char cursors.
    fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.chars.get(start).map_or(self.source.len(), |(i, _)| *i);
        let to = self.chars.get(end).map_or(self.source.len(), |(i, _)| *i);
        &self.source[from..to]
    }

    fn error(&self, position: usize, message: String) -> ConditionError {
        ConditionError::MalformedCondition {
            condition: self.source.to_string(),
            position,
            message,
        }
    }
}
