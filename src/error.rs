use crate::lexer::TokenKind;
use thiserror::Error;

/// Failures raised while turning text into an [`Expression`](crate::Expression).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("number literal '{0}' is out of range")]
    NumberOutOfRange(String),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },

    #[error("unexpected extra tokens starting at {0}")]
    ExtraTokens(TokenKind),
}

/// Failures raised while walking a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown variable \"{0}\"")]
    UnknownVariable(String),

    #[error("unknown function \"{0}\"")]
    UnknownFunction(String),

    #[error("function \"{name}\" expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow in '{operator}'")]
    Overflow { operator: char },

    #[error("result of {operation} is not representable as a decimal")]
    NotRepresentable { operation: String },

    #[error("{name}: {message}")]
    Function { name: String, message: String },
}

/// Any failure of the lex → parse → eval pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl MathError {
    pub fn is_parse(&self) -> bool {
        matches!(self, MathError::Parse(_))
    }

    pub fn is_eval(&self) -> bool {
        matches!(self, MathError::Eval(_))
    }
}

pub type Result<T> = std::result::Result<T, MathError>;
