use crate::error::LexError;
use log::debug;
use pest::error::InputLocation;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "ast/tokens.pest"]
struct TokenGrammar;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text as written; converted to `f64` by the parser.
    Number(String),
    Identifier(String),
    /// One of `+ - * / % ^`.
    Operator(char),
    LParen,
    RParen,
    Comma,
    Dot,
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => write!(f, "number '{}'", text),
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::Operator(symbol) => write!(f, "'{}'", symbol),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::End => write!(f, "end of input"),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub pos: usize,
}

impl Lexeme {
    pub fn new(token: Token, pos: usize) -> Self {
        Self { token, pos }
    }
}

/// Splits `input` into tokens. The returned sequence always ends with a
/// [`Token::End`] positioned at `input.len()`.
pub fn tokenize(input: &str) -> Result<Vec<Lexeme>, LexError> {
    debug!("Tokenizing: {}", input);
    let pairs = TokenGrammar::parse(Rule::tokens, input).map_err(|e| {
        let pos = match e.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        unexpected_character(input, pos)
    })?;

    let mut lexemes = Vec::new();
    for pair in pairs.flatten() {
        let pos = pair.as_span().start();
        let token = match pair.as_rule() {
            Rule::number => Token::Number(pair.as_str().to_string()),
            Rule::identifier => Token::Identifier(pair.as_str().to_string()),
            Rule::operator => match pair.as_str().chars().next() {
                Some(symbol) => Token::Operator(symbol),
                None => return Err(unexpected_character(input, pos)),
            },
            Rule::lparen => Token::LParen,
            Rule::rparen => Token::RParen,
            Rule::comma => Token::Comma,
            Rule::dot => Token::Dot,
            Rule::unknown => return Err(unexpected_character(input, pos)),
            _ => continue,
        };
        lexemes.push(Lexeme::new(token, pos));
    }
    lexemes.push(Lexeme::new(Token::End, input.len()));

    debug!("Tokens: {:?}", lexemes);
    Ok(lexemes)
}

fn unexpected_character(input: &str, pos: usize) -> LexError {
    let ch = input[pos..].chars().next().unwrap_or('\0');
    LexError::UnexpectedCharacter { pos, ch }
}
