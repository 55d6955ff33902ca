use crate::ast::{from_float, to_float};
use crate::env::Environment;
use crate::error::EvalError;
use mathexpr_macros::builtin_fn;
use rust_decimal::Decimal;

pub fn register(env: &mut Environment) {
    env.define_function("sin", SIN_ARITY, sin);
    env.define_function("cos", COS_ARITY, cos);
    env.define_function("tan", TAN_ARITY, tan);
}

/// Sine of an angle in radians, computed in `f64`.
#[builtin_fn]
pub fn sin(x: Decimal) -> Result<Decimal, EvalError> {
    from_float(to_float(x).sin(), || format!("sin({})", x))
}

#[builtin_fn]
pub fn cos(x: Decimal) -> Result<Decimal, EvalError> {
    from_float(to_float(x).cos(), || format!("cos({})", x))
}

#[builtin_fn]
pub fn tan(x: Decimal) -> Result<Decimal, EvalError> {
    from_float(to_float(x).tan(), || format!("tan({})", x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_to(value: Decimal, expected: f64) -> bool {
        (to_float(value) - expected).abs() < 1e-9
    }

    #[test]
    fn test_sin() {
        assert_eq!(sin(&[Decimal::ZERO]), Ok(Decimal::ZERO));
        assert!(close_to(sin(&[Decimal::ONE]).unwrap(), 1f64.sin()));
    }

    #[test]
    fn test_cos_and_tan() {
        assert_eq!(cos(&[Decimal::ZERO]), Ok(Decimal::ONE));
        assert!(close_to(tan(&[Decimal::ONE]).unwrap(), 1f64.tan()));
    }

    #[test]
    fn test_arity_is_checked() {
        assert_eq!(SIN_ARITY, 1);
        assert_eq!(
            sin(&[Decimal::ONE, Decimal::from(2)]),
            Err(EvalError::ArityMismatch {
                name: "sin".to_string(),
                expected: 1,
                found: 2
            })
        );
    }
}
