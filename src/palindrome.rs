//! Palindrome evaluation for message text.

/// Returns true when `text` reads the same forward and backward after
/// normalization: lower-cased, with every character that is not an ASCII
/// letter or digit removed. Unicode letters outside ASCII are stripped,
/// not compared. An empty normalized string counts as a palindrome.
pub fn evaluate(text: &str) -> bool {
    let normalized: Vec<u8> = text
        .bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|b| b.to_ascii_lowercase())
        .collect();

    normalized.iter().eq(normalized.iter().rev())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_phrase_is_palindrome() {
        assert!(evaluate("A man a plan a canal Panama"));
    }

    #[test]
    fn plain_word_is_not_palindrome() {
        assert!(!evaluate("hello"));
    }

    #[test]
    fn empty_text_is_palindrome() {
        assert!(evaluate(""));
    }

    #[test]
    fn punctuation_only_normalizes_to_empty() {
        assert!(evaluate("?!, .;"));
    }

    #[test]
    fn casing_is_ignored() {
        assert!(evaluate("Madam"));
        assert!(evaluate("RaceCar"));
    }

    #[test]
    fn digits_participate() {
        assert!(evaluate("1a2a1"));
        assert!(!evaluate("12"));
    }

    #[test]
    fn non_ascii_letters_are_stripped() {
        // 'é' is not an ASCII letter, so only "ne" survives normalization.
        assert!(!evaluate("née"));
        assert!(evaluate("éé"));
    }
}
