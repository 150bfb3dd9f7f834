use crate::ast::{EvaluationTrace, Value, format_number};
use crate::executor::{ExecutionTrace, TraceStatus};
use itertools::Itertools;

/// Formats evaluation and execution traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format a condition trace into a human-readable explanation.
    pub fn format_trace(trace: &EvaluationTrace) -> String {
        // Start the recursive formatting with the lowest possible parent precedence.
        Self::format_recursive(trace, 0)
    }

    /// Recursively formats the trace, adding parentheses only when necessary.
    fn format_recursive(trace: &EvaluationTrace, parent_precedence: u8) -> String {
        let current_precedence = trace.precedence();
        let needs_parens = current_precedence < parent_precedence;

        let mut result = String::new();
        if needs_parens {
            result.push('(');
        }

        match trace {
            EvaluationTrace::BinaryOp {
                op_symbol,
                left,
                right,
                ..
            } => {
                let left_str = Self::format_recursive(left, current_precedence);

                // For short-circuiting operators, only include the right side if it was evaluated.
                if !matches!(**right, EvaluationTrace::NotEvaluated) {
                    let right_str = Self::format_recursive(right, current_precedence);
                    result.push_str(&format!("{} {} {}", left_str, op_symbol, right_str));
                } else {
                    result.push_str(&left_str);
                }
            }
            EvaluationTrace::Input { name, value } => {
                result.push_str(&format!("{} (was {})", name, Self::format_value(value)));
            }
            EvaluationTrace::Literal { value } => result.push_str(&Self::format_value(value)),
            EvaluationTrace::NotEvaluated => {}
        }

        if needs_parens {
            result.push(')');
        }
        result
    }

    /// Renders an execution trace as a numbered step list followed by the final outcome.
    pub fn format_execution(trace: &ExecutionTrace) -> String {
        let steps = trace
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                format!(
                    "{:>2}. [{}] {} ({}): {}",
                    i + 1,
                    step.outcome,
                    step.node_label,
                    step.node_type,
                    step.reason
                )
            })
            .join("\n");

        let status = match &trace.status {
            TraceStatus::Completed => String::new(),
            TraceStatus::Aborted(err) => format!(" (aborted: {})", err),
        };
        format!("{}\nFinal Outcome: {}{}", steps, trace.final_outcome, status)
    }

    /// Format a value for display.
    fn format_value(value: &Value) -> String {
        match value {
            Value::Number(n) => format_number(*n),
            Value::Bool(b) => format!("{}", b),
            Value::Null => "null".to_string(),
        }
    }
}
