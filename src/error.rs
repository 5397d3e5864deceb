use std::fmt;
use thiserror::Error;

/// Pipeline stage an [`Error`] originated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    Lex,
    Parse,
    Eval,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lex => write!(f, "lex"),
            Stage::Parse => write!(f, "parse"),
            Stage::Eval => write!(f, "eval"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { pos: usize, ch: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} at position {pos}, found {found}")]
    UnexpectedToken {
        pos: usize,
        expected: &'static str,
        found: String,
    },
    /// A `(` was never closed, or a `)` has no matching `(`.
    #[error("unbalanced parentheses at position {pos}")]
    UnbalancedParens { pos: usize },
    #[error("empty input")]
    EmptyInput,
    #[error("unexpected {found} at position {pos} after a complete expression")]
    TrailingTokens { pos: usize, found: String },
    #[error("expression nesting exceeds {limit} levels at position {pos}")]
    TooDeep { pos: usize, limit: usize },
    #[error("invalid number literal '{literal}' at position {pos}")]
    InvalidNumber { pos: usize, literal: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },
    #[error("function '{name}' takes {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("numeric literal does not fit in a finite f64")]
    NumericLiteralOverflow,
    #[error("expression nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}

/// Any failure of the tokenize → parse → evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Lex(_) => Stage::Lex,
            Error::Parse(_) => Stage::Parse,
            Error::Eval(_) => Stage::Eval,
        }
    }
}
