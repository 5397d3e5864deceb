use crate::ast::{tokenize, Expression, Parser};
use crate::error::{Error, EvalError};
use crate::functions::FunctionTable;
use log::{debug, trace, warn};
use rayon::prelude::*;
use std::sync::Arc;

/// Nesting limit used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest nesting limit that can be configured. Higher values are clamped so
/// parsing and evaluation fit on a default 2 MiB thread stack.
pub const MAX_DEPTH_LIMIT: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Emit a `trace!` record for every node visited during evaluation.
    pub trace: bool,
    /// Deepest nesting accepted by both the parser and the evaluator, at most
    /// [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses and evaluates formulas against a fixed function table.
///
/// An `Evaluator` holds no per-call state: every call builds its own tokens and
/// tree, so one instance can be shared freely across threads.
#[derive(Clone)]
pub struct Evaluator {
    functions: Arc<FunctionTable>,
    config: EvaluatorConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

impl Evaluator {
    /// Creates an `Evaluator` backed by the builtin function table.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self::with_functions(FunctionTable::builtin(), config)
    }

    pub fn with_functions(functions: Arc<FunctionTable>, mut config: EvaluatorConfig) -> Self {
        if config.max_depth > MAX_DEPTH_LIMIT {
            warn!(
                "max_depth {} exceeds the limit of {}, clamping",
                config.max_depth, MAX_DEPTH_LIMIT
            );
            config.max_depth = MAX_DEPTH_LIMIT;
        }
        Self { functions, config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Parse an expression string into an AST.
    pub fn parse_expression(&self, expression: &str) -> Result<Expression, Error> {
        debug!("Parsing expression: {}", expression);
        let tokens = tokenize(expression)?;
        let ast = Parser::new(&tokens)
            .with_max_depth(self.config.max_depth)
            .parse()?;
        Ok(ast)
    }

    /// Tokenizes, parses and evaluates `expression`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if every stage succeeds. Non-finite results such as `1 / 0`
    ///   are successes.
    /// * `Err(Error)` naming the stage that rejected the input.
    pub fn evaluate_expression(&self, expression: &str) -> Result<f64, Error> {
        let ast = self.parse_expression(expression)?;
        let value = self.evaluate(&ast)?;
        debug!("{} = {}", expression, value);
        Ok(value)
    }

    /// Evaluates independent expressions in parallel. Results keep the order
    /// of `expressions`.
    pub fn evaluate_batch(&self, expressions: &[&str]) -> Vec<Result<f64, Error>> {
        debug!("Evaluating batch of {} expressions", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate_expression(expression))
            .collect()
    }

    /// Evaluates an already parsed tree.
    pub fn evaluate(&self, ast: &Expression) -> Result<f64, EvalError> {
        self.evaluate_node(ast, 0)
    }

    fn evaluate_node(&self, ast: &Expression, depth: usize) -> Result<f64, EvalError> {
        if depth > self.config.max_depth {
            return Err(EvalError::TooDeep {
                limit: self.config.max_depth,
            });
        }

        match ast {
            Expression::Literal(value) => {
                if !value.is_finite() {
                    return Err(EvalError::NumericLiteralOverflow);
                }
                if self.config.trace {
                    trace!("literal {}", value);
                }
                Ok(*value)
            }

            Expression::Unary { operator, operand } => {
                let value = operator.apply(self.evaluate_node(operand, depth + 1)?);
                if self.config.trace {
                    trace!("unary {} => {}", operator, value);
                }
                Ok(value)
            }

            Expression::Binary { .. } => {
                // Left-associative chains such as `1 + 2 + 3` nest on the left
                // and are walked iteratively. A binary right operand costs a
                // level unless it binds tighter than its parent (`1 + 2 * 3`),
                // which matches where the parser counts one.
                let mut spine = Vec::new();
                let mut node = ast;
                while let Expression::Binary {
                    left,
                    operator,
                    right,
                } = node
                {
                    spine.push((*operator, right.as_ref()));
                    node = left.as_ref();
                }

                let mut value = self.evaluate_node(node, depth)?;
                for (operator, right) in spine.into_iter().rev() {
                    let right_depth = match right {
                        Expression::Binary {
                            operator: inner, ..
                        } if inner.precedence() <= operator.precedence() => depth + 1,
                        _ => depth,
                    };
                    let right_value = self.evaluate_node(right, right_depth)?;
                    let result = operator.apply(value, right_value);
                    if self.config.trace {
                        trace!("{} {} {} => {}", value, operator, right_value, result);
                    }
                    value = result;
                }
                Ok(value)
            }

            Expression::Group(inner) => self.evaluate_node(inner, depth + 1),

            Expression::Call { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate_node(arg, depth + 1))
                    .collect::<Result<Vec<f64>, EvalError>>()?;

                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| EvalError::UnknownFunction { name: name.clone() })?;

                if function.arity() != values.len() {
                    return Err(EvalError::ArityMismatch {
                        name: name.clone(),
                        expected: function.arity(),
                        got: values.len(),
                    });
                }

                let value = function.call(&values);
                if self.config.trace {
                    trace!("call {}({:?}) => {}", name, values, value);
                }
                Ok(value)
            }
        }
    }
}
