pub mod ast;
pub mod error;
pub mod functions;
pub mod shell;

pub use ast::{Evaluator, EvaluatorConfig, Expression};
pub use error::{Error, EvalError, LexError, ParseError, Stage};
pub use functions::{Function, FunctionTable};

/// Evaluates one line of input with the builtin functions and default limits.
///
/// ```
/// assert_eq!(mathline::parse_and_eval("2 ^ 3 ^ 2"), Ok(512.0));
/// assert!(mathline::parse_and_eval("(1").is_err());
/// ```
pub fn parse_and_eval(input: &str) -> Result<f64, Error> {
    Evaluator::default().evaluate_expression(input)
}
