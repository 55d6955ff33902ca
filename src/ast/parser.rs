use crate::ast::{BinaryOperator, Expression};
use crate::error::ParseError;
use crate::lexer::{lex, Token, TokenKind};
use log::{debug, trace};

/// Recursive-descent parser over a lexed token sequence.
///
/// Grammar, loosest to tightest:
///
/// ```text
/// expr     := add_sub
/// add_sub  := mul_div (('+' | '-') mul_div)*
/// mul_div  := unary (('*' | '/') unary)*
/// unary    := '-' unary | exponent
/// exponent := primary ('^' exponent)?
/// primary  := Number | Identifier '(' args ')' | Identifier | '(' expr ')'
/// args     := expr (',' expr)*
/// ```
///
/// `+`/`-` share one loop so mixed chains group left to right, and `-2^2`
/// is `-(2^2)`.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(Token::kind) != Some(TokenKind::EndOfInput) {
            tokens.push(Token::end_of_input());
        }

        Self {
            tokens,
            position: 0,
        }
    }

    /// Lexes and parses a complete expression, rejecting trailing tokens.
    pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
        debug!("Parsing expression: {}", input);
        let mut parser = Parser::new(lex(input)?);
        let expr = parser.expr()?;
        parser.expect_finished()?;

        debug!("Parse result: {}", expr);
        Ok(expr)
    }

    /// True once the cursor sits on `EndOfInput`.
    pub fn is_finished(&self) -> bool {
        self.check(TokenKind::EndOfInput)
    }

    pub fn expect_finished(&self) -> Result<(), ParseError> {
        if self.is_finished() {
            Ok(())
        } else {
            Err(ParseError::ExtraTokens(self.peek().kind()))
        }
    }

    /// Parses one expression from the current position. Tokens after it are
    /// left in place; see [`Parser::expect_finished`].
    pub fn expr(&mut self) -> Result<Expression, ParseError> {
        self.add_sub()
    }

    fn add_sub(&mut self) -> Result<Expression, ParseError> {
        let mut node = self.mul_div()?;

        while let Some(operator) = self.match_operator(&[TokenKind::Plus, TokenKind::Minus]) {
            let right = self.mul_div()?;
            node = Expression::binary(node, operator, right);
        }

        Ok(node)
    }

    fn mul_div(&mut self) -> Result<Expression, ParseError> {
        let mut node = self.unary()?;

        while let Some(operator) = self.match_operator(&[TokenKind::Star, TokenKind::Slash]) {
            let right = self.unary()?;
            node = Expression::binary(node, operator, right);
        }

        Ok(node)
    }

    fn unary(&mut self) -> Result<Expression, ParseError> {
        if self.match_kind(TokenKind::Minus) {
            return Ok(Expression::negate(self.unary()?));
        }

        self.exponent()
    }

    fn exponent(&mut self) -> Result<Expression, ParseError> {
        let base = self.primary()?;

        if self.match_kind(TokenKind::Caret) {
            let exponent = self.exponent()?;
            return Ok(Expression::binary(base, BinaryOperator::Power, exponent));
        }

        Ok(base)
    }

    fn primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.peek();
        trace!("primary at {}: {}", self.position, token);

        match token.kind() {
            TokenKind::Number => {
                let value = token.as_number();
                self.advance();
                value.map(Expression::NumberLiteral).ok_or(ParseError::UnexpectedToken {
                    expected: "a number literal",
                    found: TokenKind::Number,
                })
            }
            TokenKind::Identifier => {
                let name = token.as_identifier().map(str::to_string);
                self.advance();
                let name = name.ok_or(ParseError::UnexpectedToken {
                    expected: "an identifier name",
                    found: TokenKind::Identifier,
                })?;

                if self.match_kind(TokenKind::OpenParen) {
                    let args = self.args()?;
                    return Ok(Expression::Call { name, args });
                }

                Ok(Expression::VariableRef(name))
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.expr()?;
                self.expect(TokenKind::CloseParen, "')'")?;
                Ok(inner)
            }
            found => Err(ParseError::UnexpectedToken {
                expected: "an expression",
                found,
            }),
        }
    }

    /// Argument list after a call's opening parenthesis, through the closing
    /// one. At least one argument is required.
    fn args(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut args = vec![self.expr()?];

        while self.match_kind(TokenKind::Comma) {
            args.push(self.expr()?);
        }

        self.expect(TokenKind::CloseParen, "',' or ')'")?;
        Ok(args)
    }

    fn peek(&self) -> &Token {
        // `new` guarantees a trailing EndOfInput and the cursor never passes it
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if !self.is_finished() {
            self.position += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind() == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn match_operator(&mut self, kinds: &[TokenKind]) -> Option<BinaryOperator> {
        let kind = self.peek().kind();
        if !kinds.contains(&kind) {
            return None;
        }

        let operator = BinaryOperator::try_from(kind).ok()?;
        self.advance();
        Some(operator)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected,
                found: self.peek().kind(),
            })
        }
    }
}

/// Parses a full token sequence into one expression. Unlike
/// [`Parser::expr`], anything left before `EndOfInput` is an error.
pub fn parse(tokens: Vec<Token>) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.expr()?;
    parser.expect_finished()?;
    Ok(expr)
}
