mod evaluator;
mod parser;

pub use evaluator::{eval, Evaluator};
pub use parser::{parse, Parser};

use crate::error::EvalError;
use crate::lexer::TokenKind;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::fmt;

/// A parsed expression. Each node owns its children and is never mutated
/// after parsing, so one tree can be evaluated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    NumberLiteral(Decimal),
    VariableRef(String),
    Call {
        name: String,
        args: Vec<Expression>,
    },
    UnaryOp {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    BinaryOp {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn number(value: impl Into<Decimal>) -> Self {
        Expression::NumberLiteral(value.into())
    }

    pub fn variable(name: &str) -> Self {
        Expression::VariableRef(name.to_string())
    }

    pub fn call(name: &str, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.to_string(),
            args,
        }
    }

    pub fn negate(operand: Expression) -> Self {
        Expression::UnaryOp {
            operator: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::NumberLiteral(value) => write!(f, "{}", value),
            Expression::VariableRef(name) => f.write_str(name),
            Expression::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expression::UnaryOp { operator, operand } => write!(f, "({}{})", operator, operand),
            Expression::BinaryOp {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    pub fn apply(&self, operand: Decimal) -> Decimal {
        match self {
            UnaryOperator::Negate => -operand,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Negate => f.write_str("-"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Power => '^',
        }
    }

    /// Combines two operands. Every operation is checked: overflow and
    /// division by zero are errors, never panics.
    ///
    /// `Power` is computed in `f64` and converted back, so its result carries
    /// binary floating-point rounding rather than exact decimal arithmetic.
    pub fn apply(&self, left: Decimal, right: Decimal) -> Result<Decimal, EvalError> {
        let overflow = || EvalError::Overflow {
            operator: self.symbol(),
        };

        match self {
            BinaryOperator::Add => left.checked_add(right).ok_or_else(overflow),
            BinaryOperator::Subtract => left.checked_sub(right).ok_or_else(overflow),
            BinaryOperator::Multiply => left.checked_mul(right).ok_or_else(overflow),
            BinaryOperator::Divide => {
                if right.is_zero() {
                    Err(EvalError::DivisionByZero)
                } else {
                    left.checked_div(right).ok_or_else(overflow)
                }
            }
            BinaryOperator::Power => {
                let base = to_float(left);
                let exponent = to_float(right);
                from_float(base.powf(exponent), || format!("{} ^ {}", left, right))
            }
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<TokenKind> for BinaryOperator {
    type Error = TokenKind;

    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::Plus => Ok(BinaryOperator::Add),
            TokenKind::Minus => Ok(BinaryOperator::Subtract),
            TokenKind::Star => Ok(BinaryOperator::Multiply),
            TokenKind::Slash => Ok(BinaryOperator::Divide),
            TokenKind::Caret => Ok(BinaryOperator::Power),
            other => Err(other),
        }
    }
}

/// Lossy conversion into binary floating point.
pub(crate) fn to_float(value: Decimal) -> f64 {
    // every Decimal lies well inside the f64 range
    value.to_f64().unwrap_or(f64::NAN)
}

/// Converts a float result back, failing for NaN, infinities and magnitudes
/// beyond the decimal range. `operation` describes the computation for the
/// error message and is only built on failure.
pub(crate) fn from_float(
    value: f64,
    operation: impl FnOnce() -> String,
) -> Result<Decimal, EvalError> {
    Decimal::from_f64(value).ok_or_else(|| EvalError::NotRepresentable {
        operation: operation(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_exact_operators() {
        assert_eq!(BinaryOperator::Add.apply(dec(7), dec(5)), Ok(dec(12)));
        assert_eq!(BinaryOperator::Subtract.apply(dec(7), dec(5)), Ok(dec(2)));
        assert_eq!(BinaryOperator::Multiply.apply(dec(7), dec(5)), Ok(dec(35)));
        assert_eq!(
            BinaryOperator::Divide.apply(dec(1), dec(4)),
            Ok(Decimal::new(25, 2))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            BinaryOperator::Divide.apply(dec(1), Decimal::ZERO),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(
            BinaryOperator::Add.apply(Decimal::MAX, dec(1)),
            Err(EvalError::Overflow { operator: '+' })
        );
        assert_eq!(
            BinaryOperator::Multiply.apply(Decimal::MAX, dec(2)),
            Err(EvalError::Overflow { operator: '*' })
        );
    }

    #[test]
    fn test_power_goes_through_float() {
        assert_eq!(BinaryOperator::Power.apply(dec(2), dec(10)), Ok(dec(1024)));
        assert_eq!(BinaryOperator::Power.apply(dec(9), dec(0)), Ok(dec(1)));
        assert!(matches!(
            BinaryOperator::Power.apply(dec(-8), Decimal::new(5, 1)),
            Err(EvalError::NotRepresentable { .. })
        ));
        assert!(matches!(
            BinaryOperator::Power.apply(dec(10), dec(40)),
            Err(EvalError::NotRepresentable { .. })
        ));
    }

    #[test]
    fn test_negate() {
        assert_eq!(UnaryOperator::Negate.apply(dec(3)), dec(-3));
    }

    #[test]
    fn test_display_is_fully_parenthesised() {
        let expr = Expression::binary(
            Expression::negate(Expression::variable("x")),
            BinaryOperator::Multiply,
            Expression::call(
                "max",
                vec![Expression::number(1), Expression::variable("pi")],
            ),
        );
        assert_eq!(expr.to_string(), "((-x) * max(1, pi))");
    }

    #[test]
    fn test_operator_from_token_kind() {
        assert_eq!(
            BinaryOperator::try_from(TokenKind::Caret),
            Ok(BinaryOperator::Power)
        );
        assert_eq!(
            BinaryOperator::try_from(TokenKind::Comma),
            Err(TokenKind::Comma)
        );
    }
}
