//! esimport_scanner: tokenizer for ECMAScript source text.
//!
//! Produces a lazy stream of classified tokens:
//! - keywords, identifiers and word operators
//! - punctuator operators, longest match first
//! - delimiters
//! - numeric literals, with the leading `-` folded in
//! - string and template literals with escapes decoded
//!
//! Identifiers are ASCII only. Template literals are opaque; `${...}` is kept
//! as text. The first lexical error ends the stream.

mod char_codes;
mod scanner;
pub mod tables;
mod token;

pub use scanner::{tokenize, Scanner, ScannerOptions};
pub use token::{Token, TokenKind, TokenValue};
