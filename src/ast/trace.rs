use super::Value;

/// A record of how a condition was evaluated, including the input values it saw.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationTrace {
    BinaryOp {
        op_symbol: &'static str,
        left: Box<EvaluationTrace>,
        right: Box<EvaluationTrace>,
        outcome: Value,
    },
    Input {
        name: String,
        value: Value,
    },
    Literal {
        value: Value,
    },
    NotEvaluated,
}

impl EvaluationTrace {
    pub fn get_outcome(&self) -> Value {
        match self {
            EvaluationTrace::BinaryOp { outcome, .. } => *outcome,
            EvaluationTrace::Input { value, .. } | EvaluationTrace::Literal { value } => *value,
            EvaluationTrace::NotEvaluated => Value::Null,
        }
    }

    /// Whether the traced expression evaluated to `true`.
    pub fn is_true(&self) -> bool {
        matches!(self.get_outcome(), Value::Bool(true))
    }

    pub fn precedence(&self) -> u8 {
        match self {
            EvaluationTrace::BinaryOp { op_symbol, .. } => match *op_symbol {
                "OR" => 1,
                "AND" => 2,
                "==" | "!=" => 4,
                ">" | ">=" | "<" | "<=" => 5,
                _ => 0,
            },
            EvaluationTrace::Input { .. }
            | EvaluationTrace::Literal { .. }
            | EvaluationTrace::NotEvaluated => 9,
        }
    }
}
