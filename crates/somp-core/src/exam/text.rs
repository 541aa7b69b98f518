//! Text normalization and tokenization.
//!
//! Alphanumeric scripts tokenize at word granularity; CJK ideographs
//! (U+4E00..=U+9FFF) tokenize one character per token, so short Chinese
//! strings still produce several comparable tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any run of (Unicode) whitespace
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    /// Full-width sentence punctuation: comma, period, exclamation, question
    pub static ref CJK_SENTENCE_PUNCTUATION: Regex = Regex::new(r"[，。！？]").unwrap();
}

/// Trim, lowercase and collapse whitespace runs to a single space.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, " ").into_owned()
}

/// Whether `c` falls in the CJK Unified Ideographs block.
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Split text into word tokens and single-ideograph tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    let mut tokens = Vec::new();
    let mut buffer = String::new();

    for c in normalized.chars() {
        if is_cjk_ideograph(c) {
            flush(&mut buffer, &mut tokens);
            tokens.push(c.to_string());
        } else if c.is_alphanumeric() {
            buffer.push(c);
        } else {
            flush(&mut buffer, &mut tokens);
        }
    }
    flush(&mut buffer, &mut tokens);

    tokens
}

fn flush(buffer: &mut String, tokens: &mut Vec<String>) {
    if !buffer.is_empty() {
        tokens.push(std::mem::take(buffer));
    }
}
