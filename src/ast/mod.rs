use std::fmt;

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::{Evaluator, EvaluatorConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use lexer::{tokenize, Lexeme, Token};
pub use parser::{parse, Parser};

/// A parsed formula. Every node owns its children; trees are built fresh for
/// each evaluation and never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(f64),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
    /// Parenthesized sub-expression. Kept only so the tree renders back to the
    /// grouping it was written with; evaluates to `inner`.
    Group(Box<Expression>),
    /// `name(args)` or `qualifier.Name(args)`. For the qualified form `name`
    /// holds the dotted key, e.g. `math.Log`.
    Call { name: String, args: Vec<Expression> },
}

impl Expression {
    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn group(inner: Expression) -> Self {
        Expression::Group(Box::new(inner))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    /// Strips any number of enclosing groups.
    pub fn ungrouped(&self) -> &Expression {
        match self {
            Expression::Group(inner) => inner.ungrouped(),
            other => other,
        }
    }
}

// Trees from long operator chains are as deep as the chain is long, so
// children are released from an explicit stack instead of recursively.
impl Drop for Expression {
    fn drop(&mut self) {
        fn take_children(node: &mut Expression, stack: &mut Vec<Expression>) {
            let placeholder = || Expression::Literal(0.0);
            match node {
                Expression::Literal(_) => {}
                Expression::Unary { operand, .. } => {
                    stack.push(std::mem::replace(operand.as_mut(), placeholder()))
                }
                Expression::Binary { left, right, .. } => {
                    stack.push(std::mem::replace(left.as_mut(), placeholder()));
                    stack.push(std::mem::replace(right.as_mut(), placeholder()));
                }
                Expression::Group(inner) => {
                    stack.push(std::mem::replace(inner.as_mut(), placeholder()))
                }
                Expression::Call { args, .. } => stack.append(args),
            }
        }

        let has_nested_children = match self {
            Expression::Literal(_) => false,
            Expression::Unary { operand, .. } => !matches!(**operand, Expression::Literal(_)),
            Expression::Binary { left, right, .. } => {
                !matches!(**left, Expression::Literal(_))
                    || !matches!(**right, Expression::Literal(_))
            }
            Expression::Group(inner) => !matches!(**inner, Expression::Literal(_)),
            Expression::Call { args, .. } => !args.is_empty(),
        };
        if !has_nested_children {
            return;
        }

        let mut stack = Vec::new();
        take_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            take_children(&mut node, &mut stack);
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Unary { operator, operand } => write!(f, "{}{}", operator, operand),
            Expression::Binary {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator, right),
            Expression::Group(inner) => write!(f, "({})", inner),
            Expression::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Minus => -operand,
        }
    }
}

impl TryFrom<char> for UnaryOperator {
    type Error = String;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(UnaryOperator::Plus),
            '-' => Ok(UnaryOperator::Minus),
            _ => Err(format!("Unknown unary operator: {}", value)),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl Operator {
    /// Applies the operator with IEEE 754 semantics. Division by zero and
    /// similar cases produce `inf`/`NaN` rather than an error.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Remainder => ieee_remainder(left, right),
            Operator::Power => left.powf(right),
        }
    }

    /// Binding strength: `+ -` bind loosest, `^` tightest.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide | Operator::Remainder => 2,
            Operator::Power => 3,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Remainder => '%',
            Operator::Power => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = String;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '%' => Ok(Operator::Remainder),
            '^' => Ok(Operator::Power),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// IEEE 754 remainder: `x - n * y` where `n` is `x / y` rounded to the
/// nearest integer, ties to even. The result lies in `[-|y|/2, |y|/2]`.
pub fn ieee_remainder(x: f64, y: f64) -> f64 {
    const TINY: f64 = 4.450_147_717_014_402_766_18e-308; // 2 * f64::MIN_POSITIVE
    const HALF_MAX: f64 = f64::MAX / 2.0;

    if x.is_nan() || y.is_nan() || x.is_infinite() || y == 0.0 {
        return f64::NAN;
    }
    if y.is_infinite() {
        return x;
    }

    let negative = x.is_sign_negative();
    let mut x = x.abs();
    let y = y.abs();
    if x == y {
        return if negative { -0.0 } else { 0.0 };
    }
    if y <= HALF_MAX {
        // `%` is exact, leaves x in [0, 2y)
        x %= y + y;
    }
    if y < TINY {
        if x + x > y {
            x -= y;
            if x + x >= y {
                x -= y;
            }
        }
    } else {
        let y_half = 0.5 * y;
        if x > y_half {
            x -= y;
            if x >= y_half {
                x -= y;
            }
        }
    }

    if negative {
        -x
    } else {
        x
    }
}
