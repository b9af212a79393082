//! The scanner.
//!
//! Converts source text into a lazy stream of classified tokens. The scanner
//! holds only its char cursor; each call to [`Scanner::next_token`] recognizes one
//! token and stops. The first lexical error ends the stream.

use crate::char_codes::*;
use crate::tables::{is_delimiter, is_keyword, is_operator, is_word_operator, MAX_OPERATOR_LEN};
use crate::token::{Token, TokenKind, TokenValue};
use esimport_core::text::{SourceText, TextSpan};
use esimport_diagnostics::{LexicalError, LexicalErrorKind};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScannerOptions {
    /// Skip `//` and `/* */` comments like whitespace. Off by default, in
    /// which case `/` always scans as an operator.
    pub skip_comments: bool,
}

/// How an escaped character is decoded.
enum Escape {
    /// The escape stands for a fixed char.
    Literal(char),
    /// The escape reads more input; the handler starts on the escape char.
    Computed(fn(&mut Scanner) -> Result<char, LexicalError>),
}

fn escape_for(ch: char) -> Option<Escape> {
    match ch {
        DOUBLE_QUOTE | SINGLE_QUOTE | BACKTICK | BACKSLASH => Some(Escape::Literal(ch)),
        'n' => Some(Escape::Literal('\n')),
        'r' => Some(Escape::Literal('\r')),
        't' => Some(Escape::Literal('\t')),
        'b' => Some(Escape::Literal('\u{0008}')),
        'f' => Some(Escape::Literal('\u{000C}')),
        'u' => Some(Escape::Computed(Scanner::scan_unicode_escape)),
        OPEN_BRACE => Some(Escape::Computed(Scanner::scan_extended_unicode_escape)),
        _ => None,
    }
}

/// Create a scanner over `text`. Tokens are produced as the iterator is pulled.
pub fn tokenize(text: &str) -> Scanner {
    Scanner::new(text)
}

/// The scanner converts source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: SourceText,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token.
    token_start: usize,
    /// Position of the backslash of the escape being decoded.
    escape_start: usize,
    options: ScannerOptions,
    /// Set once the end of input or an error has been reached.
    finished: bool,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, ScannerOptions::default())
    }

    pub fn with_options(text: &str, options: ScannerOptions) -> Self {
        Self {
            text: SourceText::new(text),
            pos: 0,
            token_start: 0,
            escape_start: 0,
            options,
            finished: false,
        }
    }

    /// The text being scanned.
    pub fn source(&self) -> &SourceText {
        &self.text
    }

    /// Current char position (end of the last token).
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Scan the next token. Returns `Ok(None)` at the end of input and after
    /// an error has been returned once.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
        if self.finished {
            return Ok(None);
        }
        let result = self.scan_token();
        match &result {
            Ok(Some(token)) => {
                tracing::trace!(kind = %token.kind, start = token.span.start, "scanned token");
            }
            Ok(None) => self.finished = true,
            Err(err) => {
                tracing::debug!(code = err.code, position = err.span.start, "lexical error");
                self.finished = true;
            }
        }
        result
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.char_at(self.pos)
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.char_at(self.pos + offset)
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn error(&self, kind: LexicalErrorKind, args: &[&str], span: TextSpan) -> LexicalError {
        LexicalError::new(kind, args, &self.text, span)
    }

    fn make_token(&self, kind: TokenKind, value: TokenValue) -> Token {
        Token::new(kind, value, TextSpan::from_bounds(self.token_start, self.pos))
    }

    /// Skip whitespace, and comments when enabled.
    fn skip_trivia(&mut self) -> Result<(), LexicalError> {
        while let Some(ch) = self.current_char() {
            if is_white_space(ch) {
                self.pos += 1;
            } else if self.options.skip_comments && ch == SLASH && self.char_at(1) == Some(SLASH) {
                self.pos += 2;
                while self.current_char().map_or(false, |c| !is_line_break(c)) {
                    self.pos += 1;
                }
            } else if self.options.skip_comments && ch == SLASH && self.char_at(1) == Some(ASTERISK) {
                let start = self.pos;
                self.pos += 2;
                loop {
                    if self.is_eof() {
                        return Err(self.error(
                            LexicalErrorKind::UnterminatedComment,
                            &[],
                            TextSpan::from_bounds(start, self.pos),
                        ));
                    }
                    if self.text.starts_with_at(self.pos, "*/") {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn scan_token(&mut self) -> Result<Option<Token>, LexicalError> {
        self.skip_trivia()?;
        self.token_start = self.pos;

        let ch = match self.current_char() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let token = if is_identifier_start(ch) {
            self.scan_identifier()
        } else if ch == MINUS && self.char_at(1).map_or(false, is_digit) {
            self.scan_number()?
        } else if let Some(len) = self.operator_length() {
            self.pos += len;
            let lexeme = self.text.slice(self.token_start, self.pos);
            self.make_token(TokenKind::Operator, TokenValue::Text(lexeme))
        } else if is_delimiter(ch) {
            self.pos += 1;
            self.make_token(TokenKind::Delimiter, TokenValue::Text(ch.to_string()))
        } else if is_digit(ch) {
            self.scan_number()?
        } else if is_quote(ch) {
            self.scan_quoted_literal(ch)?
        } else {
            return Err(self.error(
                LexicalErrorKind::UnexpectedCharacter,
                &[&ch.to_string()],
                TextSpan::new(self.pos, 1),
            ));
        };

        Ok(Some(token))
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_identifier(&mut self) -> Token {
        self.pos += 1;
        while self.current_char().map_or(false, is_identifier_part) {
            self.pos += 1;
        }
        let text = self.text.slice(self.token_start, self.pos);

        let kind = if is_keyword(&text) {
            TokenKind::Keyword
        } else if is_word_operator(&text) {
            TokenKind::Operator
        } else {
            TokenKind::Identifier
        };
        self.make_token(kind, TokenValue::Text(text))
    }

    /// Length of the longest operator starting at the cursor.
    fn operator_length(&self) -> Option<usize> {
        (1..=MAX_OPERATOR_LEN).rev().find(|&len| {
            let candidate = self.text.slice(self.pos, self.pos + len);
            if candidate.chars().count() != len || !is_operator(&candidate) {
                return false;
            }
            // `a?.5:1` is a conditional, not optional chaining.
            !(candidate == "?." && self.char_at(2).map_or(false, is_digit))
        })
    }

    fn scan_number(&mut self) -> Result<Token, LexicalError> {
        if self.current_char() == Some(MINUS) {
            self.pos += 1;
        }

        if self.current_char() == Some('0') {
            self.pos += 1;
            if self.current_char().map_or(false, is_digit) {
                return Err(self.error(
                    LexicalErrorKind::LeadingZero,
                    &[],
                    TextSpan::new(self.pos - 1, 2),
                ));
            }
        } else {
            self.scan_digits();
        }

        if self.current_char() == Some(DOT) {
            self.pos += 1;
            self.expect_digit()?;
            self.scan_digits();
        }

        if let Some('e') | Some('E') = self.current_char() {
            self.pos += 1;
            if let Some('+') | Some('-') = self.current_char() {
                self.pos += 1;
            }
            self.expect_digit()?;
            self.scan_digits();
        }

        let lexeme = self.text.slice(self.token_start, self.pos);
        let value = lexeme.parse::<f64>().map_err(|_| {
            self.error(
                LexicalErrorKind::DigitExpected,
                &[],
                TextSpan::from_bounds(self.token_start, self.pos),
            )
        })?;
        Ok(self.make_token(TokenKind::NumericLiteral, TokenValue::Number(value)))
    }

    fn scan_digits(&mut self) {
        while self.current_char().map_or(false, is_digit) {
            self.pos += 1;
        }
    }

    fn expect_digit(&self) -> Result<(), LexicalError> {
        if self.current_char().map_or(false, is_digit) {
            Ok(())
        } else {
            Err(self.error(LexicalErrorKind::DigitExpected, &[], TextSpan::new(self.pos, 1)))
        }
    }

    /// Scan a `"`, `'` or `` ` `` delimited literal, decoding escapes.
    fn scan_quoted_literal(&mut self, quote: char) -> Result<Token, LexicalError> {
        self.pos += 1; // skip opening quote
        let mut result = String::new();
        loop {
            let ch = match self.current_char() {
                Some(ch) => ch,
                None => return Err(self.unterminated_literal(quote)),
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == BACKSLASH {
                self.escape_start = self.pos;
                self.pos += 1;
                let escaped = match self.current_char() {
                    Some(escaped) => escaped,
                    None => return Err(self.unterminated_literal(quote)),
                };
                match escape_for(escaped) {
                    Some(Escape::Literal(decoded)) => {
                        self.pos += 1;
                        result.push(decoded);
                    }
                    Some(Escape::Computed(decode)) => result.push(decode(self)?),
                    None => {
                        return Err(self.error(
                            LexicalErrorKind::InvalidEscapeSequence,
                            &[&escaped.to_string()],
                            TextSpan::new(self.escape_start, 2),
                        ));
                    }
                }
                continue;
            }
            result.push(ch);
            self.pos += 1;
        }

        let kind = if quote == BACKTICK {
            TokenKind::TemplateLiteral
        } else {
            TokenKind::StringLiteral
        };
        Ok(self.make_token(kind, TokenValue::Text(result)))
    }

    fn unterminated_literal(&self, quote: char) -> LexicalError {
        let kind = if quote == BACKTICK {
            LexicalErrorKind::UnterminatedTemplateLiteral
        } else {
            LexicalErrorKind::UnterminatedStringLiteral
        };
        self.error(kind, &[], TextSpan::from_bounds(self.token_start, self.pos))
    }

    fn invalid_unicode_escape(&self) -> LexicalError {
        let end = self.pos.max(self.escape_start + 1);
        self.error(
            LexicalErrorKind::InvalidUnicodeEscape,
            &[],
            TextSpan::from_bounds(self.escape_start, end),
        )
    }

    /// `\uXXXX`, or `\u{...}`. Starts on the `u`.
    fn scan_unicode_escape(&mut self) -> Result<char, LexicalError> {
        self.pos += 1;
        if self.current_char() == Some(OPEN_BRACE) {
            return self.scan_extended_unicode_escape();
        }

        let unit = self.scan_code_unit()?;
        if (0xD800..=0xDBFF).contains(&unit) {
            if !self.text.starts_with_at(self.pos, "\\u") {
                return Err(self.invalid_unicode_escape());
            }
            self.pos += 2;
            let low = self.scan_code_unit()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.invalid_unicode_escape());
            }
            let code_point = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code_point).ok_or_else(|| self.invalid_unicode_escape());
        }

        // A lone low surrogate has no char representation either.
        char::from_u32(unit).ok_or_else(|| self.invalid_unicode_escape())
    }

    /// Exactly four hex digits forming one UTF-16 code unit.
    fn scan_code_unit(&mut self) -> Result<u32, LexicalError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let digit = self
                .current_char()
                .and_then(|ch| ch.to_digit(16))
                .ok_or_else(|| self.invalid_unicode_escape())?;
            value = value * 16 + digit;
            self.pos += 1;
        }
        Ok(value)
    }

    /// Brace-delimited hex code point. Starts on the `{`; braces nest, and the
    /// escape ends at the matching `}`.
    fn scan_extended_unicode_escape(&mut self) -> Result<char, LexicalError> {
        self.pos += 1;
        let digits_start = self.pos;
        let mut depth = 1usize;
        loop {
            match self.current_char() {
                None => return Err(self.invalid_unicode_escape()),
                Some(OPEN_BRACE) => depth += 1,
                Some(CLOSE_BRACE) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => {}
            }
            self.pos += 1;
        }
        let digits = self.text.slice(digits_start, self.pos);
        self.pos += 1; // skip closing brace

        if digits.is_empty() || !digits.chars().all(is_hex_digit) {
            return Err(self.invalid_unicode_escape());
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.invalid_unicode_escape())
    }
}

impl Iterator for Scanner {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl FusedIterator for Scanner {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_one(source: &str) -> Token {
        let mut scanner = Scanner::new(source);
        let token = scanner.next_token().expect("scan failed").expect("no token");
        assert_eq!(scanner.next_token().expect("scan failed"), None, "more than one token in {:?}", source);
        token
    }

    fn scan_err(source: &str) -> LexicalError {
        let result: Result<Vec<Token>, LexicalError> = tokenize(source).collect();
        result.expect_err("expected a lexical error")
    }

    #[test]
    fn test_scan_simple_tokens() {
        let kinds: Vec<TokenKind> = tokenize("( ) { } [ ] ; , :")
            .map(|t| t.unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![TokenKind::Delimiter; 9]);
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let tokens: Vec<Token> = tokenize("let x = 42;").map(|t| t.unwrap()).collect();
        assert!(tokens[0].is(TokenKind::Keyword, "let"));
        assert!(tokens[1].is(TokenKind::Identifier, "x"));
        assert!(tokens[2].is(TokenKind::Operator, "="));
        assert_eq!(tokens[3].number(), Some(42.0));
        assert!(tokens[4].is(TokenKind::Delimiter, ";"));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_word_operators() {
        for word in ["typeof", "delete", "in", "instanceof"] {
            assert!(scan_one(word).is(TokenKind::Operator, word));
        }
        assert!(scan_one("inside").is(TokenKind::Identifier, "inside"));
    }

    #[test]
    fn test_spread_is_one_operator() {
        assert!(scan_one("...").is(TokenKind::Operator, "..."));
        assert!(scan_one(">>>=").is(TokenKind::Operator, ">>>="));
        assert!(scan_one("**=").is(TokenKind::Operator, "**="));
    }

    #[test]
    fn test_two_dots_are_two_operators() {
        let tokens: Vec<Token> = tokenize("..").map(|t| t.unwrap()).collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.is(TokenKind::Operator, ".")));
    }

    #[test]
    fn test_optional_chaining_before_digit() {
        let tokens: Vec<Token> = tokenize("a?.5").map(|t| t.unwrap()).collect();
        assert!(tokens[1].is(TokenKind::Operator, "?"));
        assert!(tokens[2].is(TokenKind::Operator, "."));
        assert_eq!(tokens[3].number(), Some(5.0));
    }

    #[test]
    fn test_scan_numbers() {
        assert_eq!(scan_one("0").number(), Some(0.0));
        assert_eq!(scan_one("3.14").number(), Some(3.14));
        assert_eq!(scan_one("1e3").number(), Some(1000.0));
        assert_eq!(scan_one("2E+2").number(), Some(200.0));
        assert_eq!(scan_one("-0.5e-3").number(), Some(-0.0005));
    }

    #[test]
    fn test_minus_before_space_is_operator() {
        let tokens: Vec<Token> = tokenize("- 5").map(|t| t.unwrap()).collect();
        assert!(tokens[0].is(TokenKind::Operator, "-"));
        assert_eq!(tokens[1].number(), Some(5.0));
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(scan_err("01").kind, LexicalErrorKind::LeadingZero);
        assert_eq!(scan_err("1.").kind, LexicalErrorKind::DigitExpected);
        assert_eq!(scan_err("1.x").kind, LexicalErrorKind::DigitExpected);
        assert_eq!(scan_err("1e").kind, LexicalErrorKind::DigitExpected);
        assert_eq!(scan_err("1e+").kind, LexicalErrorKind::DigitExpected);
    }

    #[test]
    fn test_scan_string_escapes() {
        assert_eq!(scan_one(r#""a\nb""#).text(), Some("a\nb"));
        assert_eq!(scan_one(r#"'it\'s'"#).text(), Some("it's"));
        assert_eq!(scan_one(r#""\"\\\`""#).text(), Some("\"\\`"));
        assert_eq!(scan_one(r#""\r\t\b\f""#).text(), Some("\r\t\u{0008}\u{000C}"));
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(scan_one(r#""\u0041""#).text(), Some("A"));
        assert_eq!(scan_one(r#""\uD83D\uDE00""#).text(), Some("\u{1F600}"));
        assert_eq!(scan_one(r#""\u{1F600}""#).text(), Some("\u{1F600}"));
        assert_eq!(scan_one(r#""\{41}x""#).text(), Some("Ax"));
    }

    #[test]
    fn test_invalid_unicode_escapes() {
        assert_eq!(scan_err(r#""\u12""#).kind, LexicalErrorKind::InvalidUnicodeEscape);
        assert_eq!(scan_err(r#""\uD83D""#).kind, LexicalErrorKind::InvalidUnicodeEscape);
        assert_eq!(scan_err(r#""\uDE00""#).kind, LexicalErrorKind::InvalidUnicodeEscape);
        assert_eq!(scan_err(r#""\{}""#).kind, LexicalErrorKind::InvalidUnicodeEscape);
        assert_eq!(scan_err(r#""\{{41}}""#).kind, LexicalErrorKind::InvalidUnicodeEscape);
        assert_eq!(scan_err(r#""\{110000}""#).kind, LexicalErrorKind::InvalidUnicodeEscape);
        assert_eq!(scan_err(r#""\{41"#).kind, LexicalErrorKind::InvalidUnicodeEscape);
    }

    #[test]
    fn test_invalid_escape() {
        let err = scan_err(r#""a\qb""#);
        assert_eq!(err.kind, LexicalErrorKind::InvalidEscapeSequence);
        assert_eq!(err.span, TextSpan::new(2, 2));
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(scan_err("\"abc").kind, LexicalErrorKind::UnterminatedStringLiteral);
        assert_eq!(scan_err("'abc\\").kind, LexicalErrorKind::UnterminatedStringLiteral);
        assert_eq!(scan_err("`abc").kind, LexicalErrorKind::UnterminatedTemplateLiteral);
    }

    #[test]
    fn test_template_literal_is_opaque() {
        let token = scan_one("`a ${b} c`");
        assert_eq!(token.kind, TokenKind::TemplateLiteral);
        assert_eq!(token.text(), Some("a ${b} c"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = scan_err("a # b");
        assert_eq!(err.kind, LexicalErrorKind::UnexpectedCharacter);
        assert_eq!(err.span, TextSpan::new(2, 1));
        assert_eq!(err.context, "a #\n  ^");
    }

    #[test]
    fn test_comments_are_operators_by_default() {
        let tokens: Vec<Token> = tokenize("a // b").map(|t| t.unwrap()).collect();
        assert_eq!(tokens.len(), 4);
        assert!(tokens[1].is(TokenKind::Operator, "/"));
    }

    #[test]
    fn test_skip_comments() {
        let options = ScannerOptions { skip_comments: true };
        let source = "a // don't\n/* it's */ b";
        let tokens: Vec<Token> = Scanner::with_options(source, options)
            .map(|t| t.unwrap())
            .collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].is(TokenKind::Identifier, "b"));
    }

    #[test]
    fn test_unterminated_comment() {
        let options = ScannerOptions { skip_comments: true };
        let result: Result<Vec<Token>, LexicalError> = Scanner::with_options("a /* b", options).collect();
        assert_eq!(result.unwrap_err().kind, LexicalErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_token_spans() {
        let tokens: Vec<Token> = tokenize("import \"m\"").map(|t| t.unwrap()).collect();
        assert_eq!(tokens[0].span, TextSpan::new(0, 6));
        assert_eq!(tokens[1].span, TextSpan::new(7, 3));
    }

    #[test]
    fn test_stream_is_fused_after_error() {
        let mut scanner = tokenize("a # b");
        assert!(scanner.next().unwrap().is_ok());
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
