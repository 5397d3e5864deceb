use crate::functions::{register_with_math_alias, FunctionTable};
use mathline_macros::mathline_fn;

pub fn register(table: &mut FunctionTable) {
    register_with_math_alias(table, "abs", abs());
    register_with_math_alias(table, "floor", floor());
    register_with_math_alias(table, "ceil", ceil());
    register_with_math_alias(table, "trunc", trunc());
    register_with_math_alias(table, "round", round());
    register_with_math_alias(table, "min", min());
    register_with_math_alias(table, "max", max());
    register_with_math_alias(table, "hypot", hypot());
}

#[mathline_fn]
fn abs(x: f64) -> f64 {
    x.abs()
}

#[mathline_fn]
fn floor(x: f64) -> f64 {
    x.floor()
}

#[mathline_fn]
fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[mathline_fn]
fn trunc(x: f64) -> f64 {
    x.trunc()
}

/// Rounds half away from zero.
#[mathline_fn]
fn round(x: f64) -> f64 {
    x.round()
}

// NaN propagates, unlike f64::min/max which return the other operand.
#[mathline_fn]
fn min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

#[mathline_fn]
fn max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

#[mathline_fn]
fn hypot(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(abs().call(&[-2.5]), 2.5);
        assert_eq!(floor().call(&[-2.5]), -3.0);
        assert_eq!(ceil().call(&[-2.5]), -2.0);
        assert_eq!(trunc().call(&[-2.7]), -2.0);
        assert_eq!(round().call(&[2.5]), 3.0);
        assert_eq!(round().call(&[-2.5]), -3.0);
        assert_eq!(hypot().call(&[3.0, 4.0]), 5.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min().call(&[1.0, -1.0]), -1.0);
        assert_eq!(max().call(&[1.0, -1.0]), 1.0);
        assert!(min().call(&[f64::NAN, 1.0]).is_nan());
        assert!(max().call(&[1.0, f64::NAN]).is_nan());
    }
}
