//! Set-overlap similarity between token sets.

use std::collections::HashSet;

use super::text::tokenize;

/// Jaccard index of the token sets of `left` and `right`.
///
/// Two texts with no tokens at all are considered identical (1.0).
/// Token frequency and order are ignored.
pub fn jaccard(left: &str, right: &str) -> f64 {
    let left_tokens: HashSet<String> = tokenize(left).into_iter().collect();
    let right_tokens: HashSet<String> = tokenize(right).into_iter().collect();

    if left_tokens.is_empty() && right_tokens.is_empty() {
        return 1.0;
    }

    let intersection = left_tokens.intersection(&right_tokens).count();
    let union = left_tokens.union(&right_tokens).count();

    intersection as f64 / union as f64
}
