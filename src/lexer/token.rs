use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Number,
    Identifier,
    EndOfInput,
}

impl TokenKind {
    /// Maps a single punctuation character to its token kind.
    pub fn from_symbol(ch: char) -> Option<TokenKind> {
        match ch {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            ',' => Some(TokenKind::Comma),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::EndOfInput => "end of input",
        };
        f.write_str(text)
    }
}

/// Literal payload carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    None,
    Number(Decimal),
    Text(String),
}

/// A lexed token. Only `Number` tokens carry a number and only `Identifier`
/// tokens carry text; the constructors keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: TokenValue,
}

impl Token {
    /// A value-less token. Use [`Token::number`] and [`Token::identifier`] for
    /// the kinds that carry a literal.
    pub(crate) fn symbol(kind: TokenKind) -> Self {
        debug_assert!(!matches!(kind, TokenKind::Number | TokenKind::Identifier));
        Self {
            kind,
            value: TokenValue::None,
        }
    }

    pub fn number(value: Decimal) -> Self {
        Self {
            kind: TokenKind::Number,
            value: TokenValue::Number(value),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Identifier,
            value: TokenValue::Text(name.into()),
        }
    }

    pub fn end_of_input() -> Self {
        Self::symbol(TokenKind::EndOfInput)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            TokenValue::Number(n) => write!(f, "{} {}", self.kind, n),
            TokenValue::Text(name) => write!(f, "{} {}", self.kind, name),
        }
    }
}
