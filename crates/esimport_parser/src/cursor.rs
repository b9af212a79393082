//! One-token lookahead over the scanner.

use esimport_core::text::{SourceText, TextSpan};
use esimport_diagnostics::LexicalError;
use esimport_scanner::{Scanner, Token, TokenKind};

/// Holds the current token and pulls the next one from the scanner on demand.
pub struct TokenCursor {
    scanner: Scanner,
    current: Option<Token>,
}

impl TokenCursor {
    /// Create a cursor positioned before the first token. Call
    /// [`advance`](Self::advance) once to load it.
    pub fn new(scanner: Scanner) -> Self {
        Self {
            scanner,
            current: None,
        }
    }

    /// The current token, `None` at the end of input.
    #[inline]
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Move to the next token, returning the one moved past.
    pub fn advance(&mut self) -> Result<Option<Token>, LexicalError> {
        let next = self.scanner.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Whether the current token has this kind and text.
    #[inline]
    pub fn at(&self, kind: TokenKind, text: &str) -> bool {
        self.current.as_ref().map_or(false, |t| t.is(kind, text))
    }

    #[inline]
    pub fn at_kind(&self, kind: TokenKind) -> bool {
        self.current.as_ref().map_or(false, |t| t.kind == kind)
    }

    pub fn source(&self) -> &SourceText {
        self.scanner.source()
    }

    /// Span of the current token, or an empty span at the end of input.
    pub fn current_span(&self) -> TextSpan {
        match &self.current {
            Some(token) => token.span,
            None => TextSpan::empty(self.scanner.source().len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_returns_previous_token() {
        let mut cursor = TokenCursor::new(Scanner::new("import x"));
        assert!(cursor.current().is_none());
        assert_eq!(cursor.advance().unwrap(), None);
        assert!(cursor.at(TokenKind::Keyword, "import"));

        let previous = cursor.advance().unwrap().unwrap();
        assert!(previous.is(TokenKind::Keyword, "import"));
        assert!(cursor.at_kind(TokenKind::Identifier));

        cursor.advance().unwrap();
        assert!(cursor.current().is_none());
        assert_eq!(cursor.current_span(), TextSpan::empty(8));
    }
}
