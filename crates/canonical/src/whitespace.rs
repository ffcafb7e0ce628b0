//! Whitespace normalization.

/// Collapses repeated whitespace, trims edges, and turns newlines into
/// single spaces.
///
/// Useful for evidence strings: sentences quoted in a report keep their
/// punctuation and case but lose layout noise.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \n\n  world  "), "hello world");
/// assert_eq!(collapse_whitespace("   \t "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("hello\r\nworld"), "hello world");
        assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
        assert_eq!(collapse_whitespace("hello \t \t world"), "hello world");
    }
}
