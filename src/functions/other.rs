use crate::ast::{from_float, to_float};
use crate::env::Environment;
use crate::error::EvalError;
use mathexpr_macros::builtin_fn;
use rust_decimal::Decimal;

pub fn register(env: &mut Environment) {
    env.define_function("abs", ABS_ARITY, abs);
    env.define_function("sqrt", SQRT_ARITY, sqrt);
    env.define_function("min", MIN_ARITY, min);
    env.define_function("max", MAX_ARITY, max);
}

#[builtin_fn]
pub fn abs(x: Decimal) -> Result<Decimal, EvalError> {
    Ok(x.abs())
}

/// Square root, computed in `f64`. Negative input is rejected.
#[builtin_fn]
pub fn sqrt(x: Decimal) -> Result<Decimal, EvalError> {
    if x.is_sign_negative() && !x.is_zero() {
        return Err(EvalError::Function {
            name: "sqrt".to_string(),
            message: format!("negative argument {}", x),
        });
    }

    from_float(to_float(x).sqrt(), || format!("sqrt({})", x))
}

#[builtin_fn]
pub fn min(a: Decimal, b: Decimal) -> Result<Decimal, EvalError> {
    Ok(a.min(b))
}

#[builtin_fn]
pub fn max(a: Decimal, b: Decimal) -> Result<Decimal, EvalError> {
    Ok(a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs(&[dec(-7)]), Ok(dec(7)));
        assert_eq!(abs(&[dec(7)]), Ok(dec(7)));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(&[dec(144)]), Ok(dec(12)));
        assert_eq!(sqrt(&[Decimal::ZERO]), Ok(Decimal::ZERO));
        assert!(matches!(
            sqrt(&[dec(-4)]),
            Err(EvalError::Function { name, .. }) if name == "sqrt"
        ));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[dec(3), dec(-2)]), Ok(dec(-2)));
        assert_eq!(max(&[dec(3), dec(-2)]), Ok(dec(3)));
        assert_eq!(MAX_ARITY, 2);
        assert!(matches!(
            max(&[dec(1)]),
            Err(EvalError::ArityMismatch { expected: 2, found: 1, .. })
        ));
    }
}
