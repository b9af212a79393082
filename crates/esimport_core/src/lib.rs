//! esimport_core: Source text and span types shared by the scanner, the
//! parser and the diagnostics.

pub mod text;

pub use text::{SourceText, TextPos, TextSpan};
