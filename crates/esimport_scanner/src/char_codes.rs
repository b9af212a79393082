//! Character classes used by the scanner.

pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const BACKTICK: char = '`';
pub const BACKSLASH: char = '\\';
pub const MINUS: char = '-';
pub const DOT: char = '.';
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';
pub const SLASH: char = '/';
pub const ASTERISK: char = '*';

/// Whitespace skipped between tokens: space, tab, CR, LF, form feed, vertical tab.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{000B}' | '\u{000C}')
}

#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic()
}

/// Check if a character can be part of an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphanumeric()
}

#[inline]
pub fn is_quote(ch: char) -> bool {
    ch == DOUBLE_QUOTE || ch == SINGLE_QUOTE || ch == BACKTICK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('_'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(!is_identifier_start('é'));
    }

    #[test]
    fn test_white_space() {
        for ch in [' ', '\t', '\r', '\n', '\u{000B}', '\u{000C}'] {
            assert!(is_white_space(ch), "{:?}", ch);
        }
        assert!(!is_white_space('\u{00A0}'));
    }
}
