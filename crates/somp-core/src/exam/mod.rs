//! The language exam.
//!
//! Each case is scored on two axes:
//!
//! | Score | Compares | Meaning |
//! |-------|----------|---------|
//! | **clarity** | output vs. its paraphrase | stability under rephrasing |
//! | **content** | output vs. expected answer | alignment with the reference |
//!
//! Both are Jaccard indices over mixed-script token sets.

mod evaluator;
mod paraphrase;
mod similarity;
mod summary;
mod text;

pub use evaluator::{evaluate_cases, Evaluator};
pub use paraphrase::{paraphrase, Paraphraser, StubParaphraser};
pub use similarity::jaccard;
pub use summary::summarize;
pub use text::{normalize_text, tokenize};
