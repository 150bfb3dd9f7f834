use crate::ast::{EvaluationTrace, Expression, Operand, Value};
use ahash::AHashMap;

/// The recursive engine for evaluating a single parsed condition.
///
/// All inputs are resolved before the engine is built, so evaluation itself cannot fail.
pub(super) struct ConditionEngine<'a> {
    expression: &'a Expression,
    inputs: &'a AHashMap<&'a str, f64>,
}

impl<'a> ConditionEngine<'a> {
    pub(super) fn new(expression: &'a Expression, inputs: &'a AHashMap<&'a str, f64>) -> Self {
        Self { expression, inputs }
    }

    /// Evaluates the AST and returns a trace of the execution.
    pub(super) fn evaluate(&self) -> EvaluationTrace {
        self.evaluate_recursive(self.expression)
    }

    fn evaluate_recursive(&self, expr: &Expression) -> EvaluationTrace {
        match expr {
            Expression::Equal(l, r) => self.eval_comparison(l, r, "==", |a, b| a == b),
            Expression::NotEqual(l, r) => self.eval_comparison(l, r, "!=", |a, b| a != b),
            Expression::GreaterThan(l, r) => self.eval_comparison(l, r, ">", |a, b| a > b),
            Expression::GreaterThanOrEqual(l, r) => self.eval_comparison(l, r, ">=", |a, b| a >= b),
            Expression::SmallerThan(l, r) => self.eval_comparison(l, r, "<", |a, b| a < b),
            Expression::SmallerThanOrEqual(l, r) => self.eval_comparison(l, r, "<=", |a, b| a <= b),

            // --- Logical Operations ---
            Expression::And(l, r) => {
                let left_trace = self.evaluate_recursive(l);
                if !left_trace.is_true() {
                    return EvaluationTrace::BinaryOp {
                        op_symbol: "AND",
                        left: Box::new(left_trace),
                        right: Box::new(EvaluationTrace::NotEvaluated),
                        outcome: Value::Bool(false),
                    };
                }
                let right_trace = self.evaluate_recursive(r);
                let outcome = Value::Bool(right_trace.is_true());
                EvaluationTrace::BinaryOp {
                    op_symbol: "AND",
                    left: Box::new(left_trace),
                    right: Box::new(right_trace),
                    outcome,
                }
            }
            Expression::Or(l, r) => {
                let left_trace = self.evaluate_recursive(l);
                if left_trace.is_true() {
                    return EvaluationTrace::BinaryOp {
                        op_symbol: "OR",
                        left: Box::new(left_trace),
                        right: Box::new(EvaluationTrace::NotEvaluated),
                        outcome: Value::Bool(true),
                    };
                }
                let right_trace = self.evaluate_recursive(r);
                let outcome = Value::Bool(right_trace.is_true());
                EvaluationTrace::BinaryOp {
                    op_symbol: "OR",
                    left: Box::new(left_trace),
                    right: Box::new(right_trace),
                    outcome,
                }
            }
        }
    }

    fn eval_comparison<F>(
        &self,
        l: &Operand,
        r: &Operand,
        op: &'static str,
        f: F,
    ) -> EvaluationTrace
    where
        F: Fn(f64, f64) -> bool,
    {
        let (left_trace, lv) = self.operand(l);
        let (right_trace, rv) = self.operand(r);
        EvaluationTrace::BinaryOp {
            op_symbol: op,
            left: Box::new(left_trace),
            right: Box::new(right_trace),
            outcome: Value::Bool(f(lv, rv)),
        }
    }

    fn operand(&self, operand: &Operand) -> (EvaluationTrace, f64) {
        match operand {
            Operand::Literal(n) => (
                EvaluationTrace::Literal {
                    value: Value::Number(*n),
                },
                *n,
            ),
            Operand::Input(name) => {
                // Inputs are resolved before evaluation starts.
                let n = self.inputs.get(name.as_str()).copied().unwrap_or(f64::NAN);
                (
                    EvaluationTrace::Input {
                        name: name.clone(),
                        value: Value::Number(n),
                    },
                    n,
                )
            }
        }
    }
}
