//! esimport_diagnostics: Diagnostic messages and error types.
//!
//! Every diagnostic is fatal: the scanner and the parser stop at the first
//! one and hand it back to the caller as a [`LexicalError`] or a
//! [`SyntaxError`], unified as [`ImportError`]. Message texts live in the
//! [`messages`] table and carry stable codes.

use esimport_core::text::{SourceText, TextSpan};
use miette::{Diagnostic, LabeledSpan, SourceSpan};
use std::fmt;

/// A diagnostic message template with a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Fill the template with `args`.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Convert a char span into the byte span miette renders against.
fn source_span(text: &SourceText, span: TextSpan) -> SourceSpan {
    let start = text.byte_offset(span.start);
    let end = text.byte_offset(span.end());
    (start, end - start).into()
}

// ============================================================================
// Lexical errors
// ============================================================================

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalErrorKind {
    UnexpectedCharacter,
    DigitExpected,
    LeadingZero,
    UnterminatedStringLiteral,
    UnterminatedTemplateLiteral,
    UnterminatedComment,
    InvalidEscapeSequence,
    InvalidUnicodeEscape,
}

impl LexicalErrorKind {
    /// The message template for this kind.
    pub fn message(self) -> &'static DiagnosticMessage {
        match self {
            LexicalErrorKind::UnexpectedCharacter => &messages::UNEXPECTED_CHARACTER_0,
            LexicalErrorKind::DigitExpected => &messages::DIGIT_EXPECTED,
            LexicalErrorKind::LeadingZero => &messages::DECIMALS_CANNOT_HAVE_LEADING_ZEROS,
            LexicalErrorKind::UnterminatedStringLiteral => &messages::UNTERMINATED_STRING_LITERAL,
            LexicalErrorKind::UnterminatedTemplateLiteral => &messages::UNTERMINATED_TEMPLATE_LITERAL,
            LexicalErrorKind::UnterminatedComment => &messages::ASTERISK_SLASH_EXPECTED,
            LexicalErrorKind::InvalidEscapeSequence => &messages::INVALID_ESCAPE_SEQUENCE_0,
            LexicalErrorKind::InvalidUnicodeEscape => &messages::INVALID_UNICODE_ESCAPE_SEQUENCE,
        }
    }

    fn label(self) -> &'static str {
        match self {
            LexicalErrorKind::UnexpectedCharacter => "not part of any token",
            LexicalErrorKind::DigitExpected => "a digit is required here",
            LexicalErrorKind::LeadingZero => "leading zero",
            LexicalErrorKind::UnterminatedStringLiteral
            | LexicalErrorKind::UnterminatedTemplateLiteral => "literal starts here",
            LexicalErrorKind::UnterminatedComment => "comment starts here",
            LexicalErrorKind::InvalidEscapeSequence
            | LexicalErrorKind::InvalidUnicodeEscape => "escape",
        }
    }
}

/// A scanning failure, with the offending position and a rendered context window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at position {})", .span.start)]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub code: u32,
    pub message: String,
    /// Char span of the offending input.
    pub span: TextSpan,
    /// Up to ten chars before the error and a caret line under it.
    pub context: String,
    label: SourceSpan,
}

impl LexicalError {
    pub fn new(kind: LexicalErrorKind, args: &[&str], text: &SourceText, span: TextSpan) -> Self {
        let template = kind.message();
        Self {
            kind,
            code: template.code,
            message: template.format(args),
            span,
            context: text.context_window(span.start),
            label: source_span(text, span),
        }
    }
}

impl Diagnostic for LexicalError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("ES{}", self.code)))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.kind.label().to_string()),
            self.label,
        ))))
    }
}

// ============================================================================
// Syntax errors
// ============================================================================

/// A required token was missing or different inside an import declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at position {})", .span.start)]
pub struct SyntaxError {
    pub code: u32,
    pub message: String,
    /// What the parser required, e.g. `identifier 'from'` or `',' or '}'`.
    pub expected: String,
    /// What it got, e.g. `identifier 'b'` or `end of input`.
    pub found: String,
    pub span: TextSpan,
    label: SourceSpan,
}

impl SyntaxError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>, text: &SourceText, span: TextSpan) -> Self {
        let expected = expected.into();
        let found = found.into();
        let template = &messages::_0_EXPECTED_BUT_FOUND_1;
        Self {
            code: template.code,
            message: template.format(&[&expected, &found]),
            expected,
            found,
            span,
            label: source_span(text, span),
        }
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("ES{}", self.code)))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(format!("expected {}", self.expected)),
            self.label,
        ))))
    }
}

// ============================================================================
// Unified error
// ============================================================================

/// Any failure of an import parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ImportError {
    pub fn span(&self) -> TextSpan {
        match self {
            ImportError::Lexical(e) => e.span,
            ImportError::Syntax(e) => e.span,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ImportError::Lexical(e) => e.code,
            ImportError::Syntax(e) => e.code,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ImportError::Lexical(_))
    }
}

impl Diagnostic for ImportError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            ImportError::Lexical(e) => e.code(),
            ImportError::Syntax(e) => e.code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            ImportError::Lexical(e) => e.labels(),
            ImportError::Syntax(e) => e.labels(),
        }
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1001, "Unexpected character '{0}'.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1002, "Digit expected.");
    pub const DECIMALS_CANNOT_HAVE_LEADING_ZEROS: DiagnosticMessage = diag!(1003, "Decimals with leading zeros are not allowed.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1004, "Unterminated string literal.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1005, "Unterminated template literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1006, "'*/' expected.");
    pub const INVALID_ESCAPE_SEQUENCE_0: DiagnosticMessage = diag!(1007, "Invalid escape sequence '\\{0}'.");
    pub const INVALID_UNICODE_ESCAPE_SEQUENCE: DiagnosticMessage = diag!(1008, "Invalid Unicode escape sequence.");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const _0_EXPECTED_BUT_FOUND_1: DiagnosticMessage = diag!(1100, "Expected {0} but found {1}.");
}
