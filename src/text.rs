//! Word normalisation shared by the text-processing components.

/// Splits `text` on whitespace and normalises every token into a word.
///
/// A token is lowercased and cut at its first character outside
/// `[a-z0-9_]`, so `"Hello,"` becomes `"hello"` and `"don't"` becomes `"don"`.
/// Tokens that start with such a character normalise to an empty word,
/// which is yielded as `None` so callers can treat it as a break in the text.
pub fn words(text: &str) -> impl Iterator<Item = Option<String>> + '_ {
    text.split_whitespace().map(normalize)
}

pub fn normalize(token: &str) -> Option<String> {
    let word: String = token
        .chars()
        .flat_map(char::to_lowercase)
        .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_words() {
        assert_eq!(normalize("word_42"), Some("word_42".to_string()));
    }

    #[test]
    fn lowercases() {
        assert_eq!(normalize("HeLLo"), Some("hello".to_string()));
    }

    #[test]
    fn cuts_at_punctuation() {
        assert_eq!(normalize("end."), Some("end".to_string()));
        assert_eq!(normalize("don't"), Some("don".to_string()));
        assert_eq!(normalize("a-b"), Some("a".to_string()));
    }

    #[test]
    fn leading_punctuation_is_empty() {
        assert_eq!(normalize("--"), None);
        assert_eq!(normalize("\"quoted\""), None);
    }

    #[test]
    fn splits_on_any_whitespace() {
        let words: Vec<_> = words("The  cat\n\tsat.").collect();
        assert_eq!(
            words,
            vec![
                Some("the".to_string()),
                Some("cat".to_string()),
                Some("sat".to_string())
            ]
        );
    }
}
