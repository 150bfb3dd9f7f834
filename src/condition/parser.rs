use super::lexer::{Token, TokenKind};
use crate::ast::{Expression, Operand};
use crate::error::ConditionError;

/// Maximum parenthesis nesting accepted in a single condition.
const MAX_DEPTH: usize = 64;

/// Maximum number of comparisons in a single condition. Bounds the depth of the
/// left-leaning tree a flat `AND`/`OR` chain builds.
const MAX_TERMS: usize = 128;

/// Recursive-descent parser over the restricted condition grammar.
///
/// ```text
/// or_expr    := and_expr ( OR and_expr )*
/// and_expr   := primary ( AND primary )*
/// primary    := "(" or_expr ")" | comparison
/// comparison := operand cmp_op operand
/// operand    := IDENT | NUMBER
/// ```
pub(super) struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    terms: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            cursor: 0,
            depth: 0,
            terms: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Expression, ConditionError> {
        if self.tokens.is_empty() {
            return Err(self.error(0, "condition is empty"));
        }
        let expression = self.parse_or()?;
        match self.tokens.get(self.cursor) {
            None => Ok(expression),
            Some(token) => Err(self.error(token.position, "unexpected trailing input")),
        }
    }

    fn parse_or(&mut self) -> Result<Expression, ConditionError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression, ConditionError> {
        let mut left = self.parse_primary()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_primary()?;
            left = Expression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression, ConditionError> {
        if self.eat(&TokenKind::LeftParen) {
            if self.depth >= MAX_DEPTH {
                return Err(self.error(self.current_position(), "parentheses nested too deeply"));
            }
            self.depth += 1;
            let inner = self.parse_or()?;
            self.depth -= 1;
            if !self.eat(&TokenKind::RightParen) {
                return Err(self.error(self.current_position(), "expected ')'"));
            }
            return Ok(inner);
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression, ConditionError> {
        self.terms += 1;
        if self.terms > MAX_TERMS {
            return Err(self.error(
                self.current_position(),
                "too many comparisons in one condition",
            ));
        }
        let left = self.parse_operand()?;
        let position = self.current_position();
        let op = self
            .advance()
            .map(|token| token.kind)
            .ok_or_else(|| self.error(position, "expected a comparison operator"))?;
        let right = self.parse_operand()?;

        match op {
            TokenKind::Equal => Ok(Expression::Equal(left, right)),
            TokenKind::NotEqual => Ok(Expression::NotEqual(left, right)),
            TokenKind::Greater => Ok(Expression::GreaterThan(left, right)),
            TokenKind::GreaterEqual => Ok(Expression::GreaterThanOrEqual(left, right)),
            TokenKind::Smaller => Ok(Expression::SmallerThan(left, right)),
            TokenKind::SmallerEqual => Ok(Expression::SmallerThanOrEqual(left, right)),
            _ => Err(self.error(position, "expected a comparison operator")),
        }
    }

    fn parse_operand(&mut self) -> Result<Operand, ConditionError> {
        let position = self.current_position();
        match self.advance().map(|token| token.kind) {
            Some(TokenKind::Ident(name)) => Ok(Operand::Input(name)),
            Some(TokenKind::Number(n)) => Ok(Operand::Literal(n)),
            _ => Err(self.error(position, "expected an identifier or a number")),
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.tokens.get(self.cursor).is_some_and(|t| &t.kind == kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Position of the next token, or the end of the source once tokens run out.
    fn current_position(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .map_or(self.source.len(), |t| t.position)
    }

    fn error(&self, position: usize, message: &str) -> ConditionError {
        ConditionError::MalformedCondition {
            condition: self.source.to_string(),
            position,
            message: message.to_string(),
        }
    }
}
