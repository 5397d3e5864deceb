use crate::ast::evaluator::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use crate::ast::{Expression, Lexeme, Operator, Token, UnaryOperator};
use crate::error::ParseError;
use log::debug;

/// Parses a token sequence produced by [`tokenize`](crate::ast::tokenize)
/// with the default nesting limit.
pub fn parse(tokens: &[Lexeme]) -> Result<Expression, ParseError> {
    Parser::new(tokens).parse()
}

/// Recursive descent parser over a materialized token slice.
///
/// ```text
/// expr           := additive
/// additive       := multiplicative ( ('+' | '-') multiplicative )*
/// multiplicative := power ( ('*' | '/' | '%') power )*
/// power          := unary ( '^' power )?
/// unary          := ('+' | '-') unary | primary
/// primary        := NUMBER | call | '(' expr ')'
/// call           := IDENT ( '.' IDENT )? '(' ( expr ( ',' expr )* )? ')'
/// ```
pub struct Parser<'t> {
    tokens: &'t [Lexeme],
    cursor: usize,
    depth: usize,
    open_parens: usize,
    max_depth: usize,
    end: Lexeme,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Lexeme]) -> Self {
        // Slices that lack a trailing `End` still terminate cleanly.
        let end_pos = tokens.last().map_or(0, |last| last.pos);
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            open_parens: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            end: Lexeme::new(Token::End, end_pos),
        }
    }

    /// Sets the nesting limit, clamped to [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn parse(mut self) -> Result<Expression, ParseError> {
        if matches!(self.peek().token, Token::End) {
            return Err(ParseError::EmptyInput);
        }

        let expression = self.parse_additive()?;

        let next = self.peek();
        match next.token {
            Token::End => {
                debug!("Parsed {} tokens", self.cursor);
                Ok(expression)
            }
            Token::RParen => Err(ParseError::UnbalancedParens { pos: next.pos }),
            _ => Err(ParseError::TrailingTokens {
                pos: next.pos,
                found: next.token.to_string(),
            }),
        }
    }

    fn peek(&self) -> &Lexeme {
        self.tokens.get(self.cursor).unwrap_or(&self.end)
    }

    fn advance(&mut self) -> Lexeme {
        let lexeme = self.peek().clone();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        lexeme
    }

    /// Consumes the next token if it is one of `symbols`.
    fn next_operator(&mut self, symbols: &[char]) -> Option<char> {
        match self.peek().token {
            Token::Operator(symbol) if symbols.contains(&symbol) => {
                self.advance();
                Some(symbol)
            }
            _ => None,
        }
    }

    fn enter(&mut self, pos: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::TooDeep {
                pos,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        let next = self.peek();
        ParseError::UnexpectedToken {
            pos: next.pos,
            expected,
            found: next.token.to_string(),
        }
    }

    fn parse_additive(&mut self) -> Result<Expression, ParseError> {
        let mut node = self.parse_multiplicative()?;

        while let Some(symbol) = self.next_operator(&['+', '-']) {
            let operator = Operator::try_from(symbol).map_err(|_| self.unexpected("operator"))?;
            let right = self.parse_multiplicative()?;
            node = Expression::binary(node, operator, right);
        }

        Ok(node)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, ParseError> {
        let mut node = self.parse_power()?;

        while let Some(symbol) = self.next_operator(&['*', '/', '%']) {
            let operator = Operator::try_from(symbol).map_err(|_| self.unexpected("operator"))?;
            let right = self.parse_power()?;
            node = Expression::binary(node, operator, right);
        }

        Ok(node)
    }

    fn parse_power(&mut self) -> Result<Expression, ParseError> {
        let base = self.parse_unary()?;

        let pos = self.peek().pos;
        if self.next_operator(&['^']).is_none() {
            return Ok(base);
        }

        // Right-associative: the exponent is itself a power chain.
        self.enter(pos)?;
        let exponent = self.parse_power()?;
        self.leave();
        Ok(Expression::binary(base, Operator::Power, exponent))
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let pos = self.peek().pos;
        let Some(symbol) = self.next_operator(&['+', '-']) else {
            return self.parse_primary();
        };
        let operator = UnaryOperator::try_from(symbol).map_err(|_| self.unexpected("operator"))?;

        self.enter(pos)?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expression::unary(operator, operand))
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let next = self.peek().clone();
        match next.token {
            Token::Number(literal) => {
                self.advance();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber {
                        pos: next.pos,
                        literal,
                    })?;
                Ok(Expression::Literal(value))
            }
            Token::Identifier(name) => {
                self.advance();
                self.parse_call(name)
            }
            Token::LParen => {
                self.advance();
                self.enter(next.pos)?;
                self.open_parens += 1;
                let inner = self.parse_additive()?;
                self.expect_closing(next.pos)?;
                self.open_parens -= 1;
                self.leave();
                Ok(Expression::group(inner))
            }
            Token::RParen if self.open_parens == 0 => {
                Err(ParseError::UnbalancedParens { pos: next.pos })
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Expression, ParseError> {
        let name = if matches!(self.peek().token, Token::Dot) {
            self.advance();
            let Token::Identifier(member) = self.peek().token.clone() else {
                return Err(self.unexpected("identifier"));
            };
            self.advance();
            format!("{}.{}", name, member)
        } else {
            name
        };

        let open = self.peek().pos;
        if !matches!(self.peek().token, Token::LParen) {
            return Err(self.unexpected("'('"));
        }
        self.advance();
        self.enter(open)?;
        self.open_parens += 1;

        let mut args = Vec::new();
        if !matches!(self.peek().token, Token::RParen) {
            loop {
                args.push(self.parse_additive()?);
                if matches!(self.peek().token, Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        self.expect_closing(open)?;
        self.open_parens -= 1;
        self.leave();
        Ok(Expression::call(name, args))
    }

    /// Consumes the `)` matching the `(` at `open`.
    fn expect_closing(&mut self, open: usize) -> Result<(), ParseError> {
        match self.peek().token {
            Token::RParen => {
                self.advance();
                Ok(())
            }
            Token::End => Err(ParseError::UnbalancedParens { pos: open }),
            _ => Err(self.unexpected("')'")),
        }
    }
}
