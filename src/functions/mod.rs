//! Builtin functions a host can bind into an [`Environment`].
//!
//! Each builtin is written against named `Decimal` parameters and expanded by
//! `#[builtin_fn]` into an arity-checked body over `&[Decimal]`.

pub mod other;
pub mod trig;

use crate::env::Environment;

/// Bindings every fresh environment gets.
pub fn register_defaults(env: &mut Environment) {
    env.define_function("sin", trig::SIN_ARITY, trig::sin);
}

/// Binds every builtin.
pub fn register_functions(env: &mut Environment) {
    trig::register(env);
    other::register(env);
}
