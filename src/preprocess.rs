//! Text preprocessing
//!
//! Cleans and concatenates raw input documents into a single text stream
//! before tokenization.

use tracing::debug;

/// Normalize whitespace: newlines, tabs, and runs of spaces collapse to
/// single spaces; leading/trailing whitespace is stripped.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenate documents into one stream, dropping any that are empty after
/// cleaning. Survivors are joined with a single space.
pub fn concatenate_documents(texts: &[String]) -> String {
    let mut cleaned = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let clean = clean_text(text);
        if clean.is_empty() {
            debug!(index, "document empty after cleaning, dropped");
        } else {
            cleaned.push(clean);
        }
    }

    debug!(documents = cleaned.len(), "combined documents into one stream");
    cleaned.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_text("Hello   \n world.  "), "Hello world.");
        assert_eq!(clean_text("a\tb\r\nc"), "a b c");
        assert_eq!(clean_text("already clean"), "already clean");
    }

    #[test]
    fn test_clean_empty_inputs() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t  "), "");
    }

    #[test]
    fn test_concatenate_documents() {
        let docs = vec!["Hello world.".to_string(), "   Foo bar.  ".to_string()];
        assert_eq!(concatenate_documents(&docs), "Hello world. Foo bar.");
    }

    #[test]
    fn test_concatenate_drops_empty_documents() {
        let docs = vec![
            "first".to_string(),
            "   ".to_string(),
            String::new(),
            "last".to_string(),
        ];
        assert_eq!(concatenate_documents(&docs), "first last");
    }

    #[test]
    fn test_concatenate_nothing() {
        assert_eq!(concatenate_documents(&[]), "");
        let docs = vec!["  ".to_string(), "\n".to_string()];
        assert_eq!(concatenate_documents(&docs), "");
    }
}
