//! Static lexical tables: reserved words, word operators, operator lexemes
//! and delimiters. Token classification depends only on these.

/// ECMAScript reserved words, minus the four that classify as operators.
///
/// `from` and `as` are not reserved; they scan as identifiers and the parser
/// matches them by text.
pub const KEYWORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Words that scan as `Operator` tokens.
pub const WORD_OPERATORS: &[&str] = &["typeof", "delete", "in", "instanceof"];

/// Punctuator operators. Scanning takes the longest lexeme in this table.
pub const OPERATORS: &[&str] = &[
    // Arithmetic
    "+", "-", "*", "/", "%", "**", "++", "--",
    // Assignment
    "=", "+=", "-=", "*=", "/=", "%=", "**=",
    "<<=", ">>=", ">>>=", "&=", "|=", "^=",
    "&&=", "||=", "??=",
    // Comparison
    "==", "!=", "===", "!==", "<", ">", "<=", ">=",
    // Bitwise
    "&", "|", "^", "~", "<<", ">>", ">>>",
    // Logical
    "!", "&&", "||", "??",
    // Conditional, member access, spread, arrow
    "?", "?.", ".", "...", "=>",
];

/// Length in chars of the longest entry in [`OPERATORS`].
pub const MAX_OPERATOR_LEN: usize = 4;

/// Single-character delimiters.
pub const DELIMITERS: &[char] = &['{', '}', '(', ')', '[', ']', ',', ';', ':'];

#[inline]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

#[inline]
pub fn is_word_operator(word: &str) -> bool {
    WORD_OPERATORS.contains(&word)
}

#[inline]
pub fn is_operator(lexeme: &str) -> bool {
    OPERATORS.contains(&lexeme)
}

#[inline]
pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_operator_len_matches_table() {
        let longest = OPERATORS.iter().map(|op| op.chars().count()).max();
        assert_eq!(longest, Some(MAX_OPERATOR_LEN));
    }

    #[test]
    fn test_tables_do_not_overlap() {
        for word in WORD_OPERATORS {
            assert!(!is_keyword(word), "{} is both keyword and operator", word);
        }
        for op in OPERATORS {
            if op.chars().count() == 1 {
                let ch = op.chars().next().unwrap();
                assert!(!is_delimiter(ch), "{} is both operator and delimiter", op);
            }
        }
    }

    #[test]
    fn test_contextual_words_are_not_reserved() {
        assert!(!is_keyword("from"));
        assert!(!is_keyword("as"));
        assert!(is_keyword("import"));
        assert!(is_keyword("default"));
    }
}
