//! Character classes for word movement and word deletion

/// Symbols that end a word without being whitespace
pub fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() && ch != '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    /// Letters, digits and `_`
    WordChar,
    Punctuation,
}

pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

pub fn is_word_boundary(ch: char) -> bool {
    char_type(ch) != CharType::WordChar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_types() {
        assert_eq!(char_type(' '), CharType::Whitespace);
        assert_eq!(char_type('\n'), CharType::Whitespace);
        assert_eq!(char_type('a'), CharType::WordChar);
        assert_eq!(char_type('_'), CharType::WordChar);
        assert_eq!(char_type('é'), CharType::WordChar);
        assert_eq!(char_type('('), CharType::Punctuation);
        assert_eq!(char_type('"'), CharType::Punctuation);
    }

    #[test]
    fn test_word_boundary() {
        assert!(is_word_boundary(':'));
        assert!(is_word_boundary(' '));
        assert!(!is_word_boundary('x'));
    }
}
