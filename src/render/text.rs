//! Plain text renderer implementation.

/// Plain text output is the extracted text itself.
pub fn to_text(text: &str) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_unchanged() {
        let text = "First\n\nSecond\tcolumn";
        assert_eq!(to_text(text), text);
    }
}
