use crate::functions::{register_with_math_alias, FunctionTable};
use mathline_macros::mathline_fn;

pub fn register(table: &mut FunctionTable) {
    register_with_math_alias(table, "sin", sin());
    register_with_math_alias(table, "cos", cos());
    register_with_math_alias(table, "tan", tan());
    register_with_math_alias(table, "asin", asin());
    register_with_math_alias(table, "acos", acos());
    register_with_math_alias(table, "atan", atan());
    register_with_math_alias(table, "atan2", atan2());
}

#[mathline_fn]
fn sin(x: f64) -> f64 {
    x.sin()
}

#[mathline_fn]
fn cos(x: f64) -> f64 {
    x.cos()
}

#[mathline_fn]
fn tan(x: f64) -> f64 {
    x.tan()
}

#[mathline_fn]
fn asin(x: f64) -> f64 {
    x.asin()
}

#[mathline_fn]
fn acos(x: f64) -> f64 {
    x.acos()
}

#[mathline_fn]
fn atan(x: f64) -> f64 {
    x.atan()
}

/// Angle of the point `(x, y)`; arguments in `atan2(y, x)` order.
#[mathline_fn]
fn atan2(y: f64, x: f64) -> f64 {
    y.atan2(x)
}
