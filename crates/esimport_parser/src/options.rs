//! Parser configuration.

use esimport_scanner::ScannerOptions;
use serde::{Deserialize, Serialize};

/// Which import forms the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportGrammar {
    /// Default, plain named lists and namespace imports only.
    Basic,
    /// Every static import form: aliases, combined clauses, side-effect
    /// imports. `import(` and `import.` are skipped.
    #[default]
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    pub grammar: ImportGrammar,
    /// Treat `//` and `/* */` comments as whitespace.
    pub skip_comments: bool,
}

impl ParseOptions {
    pub fn basic() -> Self {
        Self {
            grammar: ImportGrammar::Basic,
            ..Self::default()
        }
    }

    pub fn scanner_options(&self) -> ScannerOptions {
        ScannerOptions {
            skip_comments: self.skip_comments,
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.grammar == ImportGrammar::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.grammar, ImportGrammar::Full);
        assert!(!options.skip_comments);
        assert!(!ParseOptions::basic().is_full());
    }

    #[test]
    fn test_scanner_options_follow_parse_options() {
        let options = ParseOptions {
            skip_comments: true,
            ..ParseOptions::default()
        };
        assert!(options.scanner_options().skip_comments);
    }
}
