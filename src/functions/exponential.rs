use crate::functions::{register_with_math_alias, FunctionTable};
use mathline_macros::mathline_fn;

pub fn register(table: &mut FunctionTable) {
    register_with_math_alias(table, "exp", exp());
    register_with_math_alias(table, "log", log());
    register_with_math_alias(table, "log2", log2());
    register_with_math_alias(table, "log10", log10());
    register_with_math_alias(table, "sqrt", sqrt());
    register_with_math_alias(table, "pow", pow());
}

#[mathline_fn]
fn exp(x: f64) -> f64 {
    x.exp()
}

/// Natural logarithm.
#[mathline_fn]
fn log(x: f64) -> f64 {
    x.ln()
}

#[mathline_fn]
fn log2(x: f64) -> f64 {
    x.log2()
}

#[mathline_fn]
fn log10(x: f64) -> f64 {
    x.log10()
}

#[mathline_fn]
fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[mathline_fn]
fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}
