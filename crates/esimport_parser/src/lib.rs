//! esimport_parser: recognizes ECMAScript import declarations.
//!
//! Pulls tokens from the scanner one at a time and turns each `import`
//! declaration into [`ImportStatement`] records. Everything that is not an
//! import is stepped over without being parsed.

mod ast;
mod cursor;
mod options;
mod parser;

pub use ast::{ImportSpecifier, ImportStatement};
pub use cursor::TokenCursor;
pub use esimport_diagnostics::ImportError;
pub use options::{ImportGrammar, ParseOptions};
pub use parser::Parser;

/// Parse all import declarations in `text` with the default options.
pub fn parse_imports(text: &str) -> Result<Vec<ImportStatement>, ImportError> {
    parse_imports_with(text, &ParseOptions::default())
}

pub fn parse_imports_with(text: &str, options: &ParseOptions) -> Result<Vec<ImportStatement>, ImportError> {
    Parser::new(text, options).parse()
}
