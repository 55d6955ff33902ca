use crate::ast::Expression;
use crate::env::Environment;
use crate::error::EvalError;
use log::trace;
use rust_decimal::Decimal;

/// Walks an [`Expression`] against a borrowed [`Environment`].
///
/// The evaluator holds no state of its own, so the same tree can be
/// evaluated again, under this or any other environment, with independent
/// results.
pub struct Evaluator<'env> {
    env: &'env Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// Evaluates `ast`. Both operands of a binary node are always evaluated,
    /// left first; call arguments are evaluated left to right.
    pub fn evaluate(&self, ast: &Expression) -> Result<Decimal, EvalError> {
        trace!("Evaluating node: {}", ast);

        match ast {
            Expression::NumberLiteral(value) => Ok(*value),

            Expression::VariableRef(name) => self
                .env
                .resolve_variable(name)
                .ok_or_else(|| EvalError::UnknownVariable(name.clone())),

            Expression::UnaryOp { operator, operand } => {
                let value = self.evaluate(operand)?;
                Ok(operator.apply(value))
            }

            Expression::BinaryOp {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;
                operator.apply(left_value, right_value)
            }

            Expression::Call { name, args } => {
                let function = self
                    .env
                    .resolve_function(name)
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;

                if function.arity() != args.len() {
                    return Err(EvalError::ArityMismatch {
                        name: name.clone(),
                        expected: function.arity(),
                        found: args.len(),
                    });
                }

                let mut values = Vec::with_capacity(function.arity());
                for arg in args {
                    values.push(self.evaluate(arg)?);
                }

                function.call(&values)
            }
        }
    }
}

/// Evaluates `expr` against `env`.
pub fn eval(expr: &Expression, env: &Environment) -> Result<Decimal, EvalError> {
    Evaluator::new(env).evaluate(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Parser};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn setup_environment() -> Environment {
        let mut env = Environment::empty();
        env.define_variable("price", dec(100));
        env.define_variable("volume", dec(20));
        env.define_function("add", 2, |args| Ok(args[0] + args[1]));
        env.define_function("constant", 0, |_| Ok(dec(42)));
        env
    }

    fn evaluate_str(input: &str, env: &Environment) -> Result<Decimal, EvalError> {
        eval(&Parser::parse_expression(input).unwrap(), env)
    }

    #[test]
    fn test_simple_binary_expression() {
        let env = setup_environment();
        assert_eq!(evaluate_str("price + volume", &env), Ok(dec(120)));
        assert_eq!(evaluate_str("price - volume", &env), Ok(dec(80)));
        assert_eq!(evaluate_str("price * volume", &env), Ok(dec(2000)));
        assert_eq!(evaluate_str("price / volume", &env), Ok(dec(5)));
    }

    #[test]
    fn test_complex_arithmetic() {
        let env = setup_environment();
        assert_eq!(evaluate_str("price + 20 * volume", &env), Ok(dec(500)));
        assert_eq!(
            evaluate_str("(price + 10) * (volume - 5)", &env),
            Ok(dec(1650))
        );
    }

    #[test]
    fn test_function_call_with_args() {
        let env = setup_environment();
        assert_eq!(evaluate_str("add(price, 10)", &env), Ok(dec(110)));
        assert_eq!(evaluate_str("add(add(1, 2), -3)", &env), Ok(dec(0)));
    }

    #[test]
    fn test_zero_arity_call_from_tree() {
        let env = setup_environment();
        let ast = Expression::call("constant", vec![]);
        assert_eq!(eval(&ast, &env), Ok(dec(42)));
    }

    #[test]
    fn test_direct_ast_binary_operation() {
        let env = setup_environment();
        let ast = Expression::binary(
            Expression::variable("price"),
            BinaryOperator::Add,
            Expression::number(20),
        );
        assert_eq!(eval(&ast, &env), Ok(dec(120)));
    }

    #[test]
    fn test_unknown_names() {
        let env = setup_environment();
        assert_eq!(
            evaluate_str("invalid + 10", &env),
            Err(EvalError::UnknownVariable("invalid".to_string()))
        );
        assert_eq!(
            evaluate_str("undefined(1)", &env),
            Err(EvalError::UnknownFunction("undefined".to_string()))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let env = setup_environment();
        assert_eq!(
            evaluate_str("add(1)", &env),
            Err(EvalError::ArityMismatch {
                name: "add".to_string(),
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_arity_checked_before_arguments() {
        let env = setup_environment();
        assert!(matches!(
            evaluate_str("add(missing)", &env),
            Err(EvalError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn test_variables_and_functions_have_separate_names() {
        let mut env = setup_environment();
        env.define_variable("add", dec(7));
        assert_eq!(evaluate_str("add(add, add)", &env), Ok(dec(14)));
    }

    #[test]
    fn test_division_by_zero() {
        let mut env = setup_environment();
        env.define_variable("zero", Decimal::ZERO);
        assert_eq!(
            evaluate_str("price / zero", &env),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let env = setup_environment();
        assert_eq!(
            evaluate_str("a / 0 + b", &env),
            Err(EvalError::UnknownVariable("a".to_string()))
        );
        assert_eq!(
            evaluate_str("1 / 0 + b", &env),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_function_error_is_returned_unchanged() {
        let mut env = Environment::empty();
        env.define_function("fail", 1, |_| {
            Err(EvalError::Function {
                name: "fail".to_string(),
                message: "always".to_string(),
            })
        });
        assert_eq!(
            evaluate_str("fail(1)", &env),
            Err(EvalError::Function {
                name: "fail".to_string(),
                message: "always".to_string()
            })
        );
    }

    #[test]
    fn test_arguments_evaluated_left_to_right() {
        let order = Arc::new(AtomicUsize::new(0));
        let mut env = Environment::empty();

        let counter = Arc::clone(&order);
        env.define_function("tick", 1, move |args| {
            let seen = counter.fetch_add(1, Ordering::SeqCst);
            Ok(args[0] * dec(10) + Decimal::from(seen))
        });
        env.define_function("pair", 2, |args| Ok(args[0] * dec(100) + args[1]));

        // tick(1) runs first (10 + 0), then tick(2) (20 + 1)
        assert_eq!(evaluate_str("pair(tick(1), tick(2))", &env), Ok(dec(1021)));
    }

    #[test]
    fn test_same_tree_different_environments() {
        let ast = Parser::parse_expression("x * 2").unwrap();

        let mut first = Environment::empty();
        first.define_variable("x", dec(3));
        let mut second = Environment::empty();
        second.define_variable("x", dec(5));

        assert_eq!(eval(&ast, &first), Ok(dec(6)));
        assert_eq!(eval(&ast, &second), Ok(dec(10)));
        assert_eq!(eval(&ast, &first), Ok(dec(6)));
    }

    #[test]
    fn test_large_expression() {
        let input = (0..50)
            .map(|i| format!("price{}", i))
            .collect::<Vec<_>>()
            .join(" + ");

        let mut env = Environment::empty();
        for i in 0..50 {
            env.define_variable(&format!("price{}", i), dec(i));
        }
        assert_eq!(evaluate_str(&input, &env), Ok(dec(1225)));
    }
}
