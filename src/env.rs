use crate::ast::{eval, Parser};
use crate::error::EvalError;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Body of a function bound in an [`Environment`]. It receives exactly
/// `arity` evaluated arguments.
pub type FunctionBody = Arc<dyn Fn(&[Decimal]) -> Result<Decimal, EvalError> + Send + Sync>;

/// A function binding: a fixed argument count and the body to call.
#[derive(Clone)]
pub struct FunctionDef {
    arity: usize,
    body: FunctionBody,
}

impl FunctionDef {
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn call(&self, args: &[Decimal]) -> Result<Decimal, EvalError> {
        (self.body)(args)
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name bindings consulted during evaluation.
///
/// The host mutates an environment between evaluations; evaluation itself
/// only reads it.
#[derive(Clone, Debug)]
pub struct Environment {
    variables: HashMap<String, Decimal>,
    functions: HashMap<String, FunctionDef>,
}

impl Environment {
    /// An environment with the default bindings: `pi`, plus `sin` when the
    /// `functions` feature is enabled.
    pub fn new() -> Self {
        let mut env = Self::empty();
        env.define_variable("pi", pi());

        #[cfg(feature = "functions")]
        crate::functions::register_defaults(&mut env);

        env
    }

    /// An environment with no bindings at all.
    pub fn empty() -> Self {
        Self {
            variables: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn define_variable(&mut self, name: &str, value: Decimal) {
        debug!("Defining variable {} = {}", name, value);
        self.variables.insert(name.to_string(), value);
    }

    /// Binds `name` to a function taking exactly `arity` arguments, replacing
    /// any previous binding.
    pub fn define_function<F>(&mut self, name: &str, arity: usize, body: F)
    where
        F: Fn(&[Decimal]) -> Result<Decimal, EvalError> + Send + Sync + 'static,
    {
        debug!("Defining function {}/{}", name, arity);
        self.functions.insert(
            name.to_string(),
            FunctionDef {
                arity,
                body: Arc::new(body),
            },
        );
    }

    pub fn resolve_variable(&self, name: &str) -> Option<Decimal> {
        self.variables.get(name).copied()
    }

    pub fn resolve_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Decimal> {
        self.variables.remove(name)
    }

    pub fn remove_function(&mut self, name: &str) -> Option<FunctionDef> {
        self.functions.remove(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Lexes, parses and evaluates `text` against this environment. The
    /// first failure from any stage is returned unchanged.
    pub fn eval_math_string(&self, text: &str) -> crate::Result<Decimal> {
        debug!("Evaluating expression: {}", text);
        let expr = Parser::parse_expression(text)?;
        let value = eval(&expr, self)?;

        debug!("Result: {}", value);
        Ok(value)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// π as the `f64` constant carries it, rendered to 15 decimal places.
fn pi() -> Decimal {
    Decimal::new(3_141_592_653_589_793, 15)
}
