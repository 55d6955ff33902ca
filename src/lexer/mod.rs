mod token;

pub use token::{Token, TokenKind, TokenValue};

use crate::error::ParseError;
use log::{debug, trace};
use rust_decimal::Decimal;
use std::iter::Peekable;
use std::str::CharIndices;

/// Converts source text into tokens, one call to [`Lexer::lex`] per input.
pub struct Lexer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    /// Lexes the whole input. The returned sequence always ends with exactly
    /// one `EndOfInput` token.
    pub fn lex(mut self) -> Result<Vec<Token>, ParseError> {
        debug!("Lexing expression: {}", self.text);
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            trace!("token: {token}");
            tokens.push(token);
        }

        tokens.push(Token::end_of_input());
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }

            if ch.is_ascii_digit() {
                return self.read_number(offset).map(Some);
            }

            if ch.is_ascii_alphabetic() {
                return Ok(Some(self.read_identifier(offset)));
            }

            self.chars.next();
            return match TokenKind::from_symbol(ch) {
                Some(kind) => Ok(Some(Token::symbol(kind))),
                None => Err(ParseError::UnexpectedCharacter {
                    character: ch,
                    offset,
                }),
            };
        }

        Ok(None)
    }

    /// Consumes characters while `accept` holds and returns the end offset.
    fn consume_while(&mut self, accept: impl Fn(char) -> bool) -> usize {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !accept(ch) {
                break;
            }
            self.chars.next();
        }

        self.chars.peek().map_or(self.text.len(), |&(offset, _)| offset)
    }

    fn read_number(&mut self, start: usize) -> Result<Token, ParseError> {
        let end = self.consume_while(|ch| ch.is_ascii_digit());
        let digits = &self.text[start..end];

        Decimal::from_str_exact(digits)
            .map(Token::number)
            .map_err(|_| ParseError::NumberOutOfRange(digits.to_string()))
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        let end = self.consume_while(|ch| ch.is_ascii_alphanumeric());
        Token::identifier(&self.text[start..end])
    }
}

/// Lexes `text` into a token sequence terminated by `EndOfInput`.
pub fn lex(text: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(text).lex()
}
