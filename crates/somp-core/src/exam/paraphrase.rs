//! Paraphrase step used by the clarity check.
//!
//! Real deployments would call a rephrasing model here. The shipped
//! implementation is a deterministic local stub so exam runs are reproducible.

use super::text::{normalize_text, CJK_SENTENCE_PUNCTUATION, WHITESPACE_RUN};

/// Produces a rephrased version of a model output.
pub trait Paraphraser {
    fn paraphrase(&self, text: &str) -> String;
}

/// Deterministic placeholder for an external rephrasing service.
///
/// Lowercases, trims, collapses whitespace and replaces full-width
/// sentence punctuation with spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubParaphraser;

impl Paraphraser for StubParaphraser {
    fn paraphrase(&self, text: &str) -> String {
        paraphrase(text)
    }
}

/// The stub transform as a free function.
pub fn paraphrase(text: &str) -> String {
    let normalized = normalize_text(text);
    let stripped = CJK_SENTENCE_PUNCTUATION.replace_all(&normalized, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_normalized() {
        assert_eq!(paraphrase("  Hello   World "), "hello world");
    }

    #[test]
    fn test_full_width_punctuation_replaced() {
        assert_eq!(paraphrase("你好，世界！真的吗？"), "你好 世界 真的吗 ");
    }

    #[test]
    fn test_ascii_punctuation_kept() {
        assert_eq!(paraphrase("Hi, there!"), "hi, there!");
    }

    #[test]
    fn test_deterministic() {
        let input = "Same INPUT。 twice";
        assert_eq!(paraphrase(input), paraphrase(input));
        assert_eq!(StubParaphraser.paraphrase(input), paraphrase(input));
    }

    #[test]
    fn test_empty() {
        assert_eq!(paraphrase(""), "");
    }
}
