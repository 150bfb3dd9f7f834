//! Restricted-grammar rule conditions.
//!
//! Conditions are parsed into an explicit AST and evaluated by walking it. Nothing here hands
//! user-authored text to a general-purpose interpreter: anything outside the grammar is a
//! [`ConditionError::MalformedCondition`].

use crate::ast::{EvaluationTrace, Expression};
use crate::data::DataSource;
use crate::error::ConditionError;
use ahash::AHashMap;
use std::fmt;

mod engine;
mod lexer;
mod parser;

use engine::ConditionEngine;
use lexer::Lexer;
use parser::Parser;

/// A parsed rule condition, ready to be evaluated against any number of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    source: String,
    expression: Expression,
}

impl Condition {
    pub fn parse(source: &str) -> Result<Self, ConditionError> {
        let tokens = Lexer::new(source).tokenize()?;
        let expression = Parser::new(source, tokens).parse()?;
        Ok(Self {
            source: source.to_string(),
            expression,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Evaluates the condition, returning the trace of how the result was reached.
    ///
    /// Every identifier is looked up before anything is evaluated, so an unknown name fails
    /// the condition even when short-circuiting would never have reached it.
    pub fn evaluate_traced<D>(&self, data: &D) -> Result<EvaluationTrace, ConditionError>
    where
        D: DataSource + ?Sized,
    {
        let mut inputs = AHashMap::new();
        for name in self.expression.required_inputs() {
            let value = data
                .lookup(name)
                .ok_or_else(|| ConditionError::UnknownIdentifier {
                    name: name.to_string(),
                })?;
            inputs.insert(name, value);
        }
        Ok(ConditionEngine::new(&self.expression, &inputs).evaluate())
    }

    pub fn evaluate<D>(&self, data: &D) -> Result<bool, ConditionError>
    where
        D: DataSource + ?Sized,
    {
        self.evaluate_traced(data).map(|trace| trace.is_true())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Parses and evaluates `condition` in one go.
pub fn evaluate<D>(condition: &str, data: &D) -> Result<bool, ConditionError>
where
    D: DataSource + ?Sized,
{
    Condition::parse(condition)?.evaluate(data)
}
