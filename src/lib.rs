pub mod ast;
pub mod env;
pub mod error;
#[cfg(feature = "functions")]
pub mod functions;
pub mod lexer;

pub use ast::{eval, parse, Evaluator, Expression, Parser};
pub use env::{Environment, FunctionBody, FunctionDef};
pub use error::{EvalError, MathError, ParseError, Result};
pub use lexer::{lex, Token, TokenKind, TokenValue};
pub use rust_decimal::Decimal;

/// Evaluates `text` against `env`: lex, parse, reject trailing tokens, then
/// evaluate. The first failure from any stage is returned unchanged.
pub fn eval_math_string(text: &str, env: &Environment) -> Result<Decimal> {
    env.eval_math_string(text)
}
