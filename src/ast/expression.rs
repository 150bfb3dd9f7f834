use super::Operand;
use itertools::Itertools;
use std::fmt;

/// The Abstract Syntax Tree of a parsed rule condition.
///
/// The grammar only allows comparisons at the leaves and boolean combinators above them,
/// so every well-formed tree evaluates to a boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Logical
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),

    // Comparison
    Equal(Operand, Operand),
    NotEqual(Operand, Operand),
    GreaterThan(Operand, Operand),
    GreaterThanOrEqual(Operand, Operand),
    SmallerThan(Operand, Operand),
    SmallerThanOrEqual(Operand, Operand),
}

impl Expression {
    /// Collects the input names this expression reads, in source order.
    pub fn get_required_inputs<'a>(&'a self, inputs: &mut Vec<&'a str>) {
        match self {
            Expression::And(l, r) | Expression::Or(l, r) => {
                l.get_required_inputs(inputs);
                r.get_required_inputs(inputs);
            }
            Expression::Equal(l, r)
            | Expression::NotEqual(l, r)
            | Expression::GreaterThan(l, r)
            | Expression::GreaterThanOrEqual(l, r)
            | Expression::SmallerThan(l, r)
            | Expression::SmallerThanOrEqual(l, r) => {
                for operand in [l, r] {
                    if let Operand::Input(name) = operand {
                        inputs.push(name);
                    }
                }
            }
        }
    }

    /// The distinct input names of this expression, first occurrence first.
    pub fn required_inputs(&self) -> Vec<&str> {
        let mut inputs = Vec::new();
        self.get_required_inputs(&mut inputs);
        inputs.into_iter().unique().collect()
    }

    pub fn op_symbol(&self) -> &'static str {
        match self {
            Expression::And(..) => "AND",
            Expression::Or(..) => "OR",
            Expression::Equal(..) => "==",
            Expression::NotEqual(..) => "!=",
            Expression::GreaterThan(..) => ">",
            Expression::GreaterThanOrEqual(..) => ">=",
            Expression::SmallerThan(..) => "<",
            Expression::SmallerThanOrEqual(..) => "<=",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Or(..) => 1,
            Expression::And(..) => 2,
            _ => 5,
        }
    }

    fn fmt_child(&self, child: &Expression, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if child.precedence() < self.precedence() {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

/// Canonical infix form, with parentheses only where precedence requires them.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::And(l, r) | Expression::Or(l, r) => {
                self.fmt_child(l, f)?;
                write!(f, " {} ", self.op_symbol())?;
                self.fmt_child(r, f)
            }
            Expression::Equal(l, r)
            | Expression::NotEqual(l, r)
            | Expression::GreaterThan(l, r)
            | Expression::GreaterThanOrEqual(l, r)
            | Expression::SmallerThan(l, r)
            | Expression::SmallerThanOrEqual(l, r) => {
                write!(f, "{} {} {}", l, self.op_symbol(), r)
            }
        }
    }
}
