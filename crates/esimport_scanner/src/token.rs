//! Tokens produced by the scanner.

use esimport_core::text::TextSpan;
use std::fmt;

/// The closed set of token classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    Delimiter,
    NumericLiteral,
    StringLiteral,
    TemplateLiteral,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::NumericLiteral => "numeric literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::TemplateLiteral => "template literal",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Value of a numeric literal.
    Number(f64),
    /// Matched text; decoded content for string and template literals.
    Text(String),
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// Where the lexeme sits in the source, quotes included.
    pub span: TextSpan,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, span: TextSpan) -> Self {
        Self { kind, value, span }
    }

    /// The text payload, `None` for numeric literals.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            TokenValue::Number(_) => None,
        }
    }

    /// The numeric payload, `None` for everything but numeric literals.
    pub fn number(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            TokenValue::Text(_) => None,
        }
    }

    /// Whether this token has the given kind and text.
    #[inline]
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text() == Some(text)
    }

    /// Describe the token for diagnostics, e.g. `identifier 'b'`.
    pub fn describe(&self) -> String {
        match &self.value {
            TokenValue::Number(n) => format!("{} {}", self.kind, n),
            TokenValue::Text(text) => format!("{} '{}'", self.kind, text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
