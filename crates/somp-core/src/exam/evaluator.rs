//! Per-case scoring.
//!
//! For every case the evaluator looks up the model output, paraphrases it,
//! and scores:
//! - clarity: overlap between the output and its paraphrase
//! - content: overlap between the output and the expected answer
//!
//! A case passes only when both scores reach their thresholds. Cases
//! without a reference answer always score 1.0 on content.

use tracing::debug;

use crate::types::{CaseResult, OutputMap, Summary, TestCase, Thresholds};

use super::paraphrase::{Paraphraser, StubParaphraser};
use super::similarity::jaccard;
use super::summary::summarize;

/// Scores test cases against model outputs.
pub struct Evaluator<P = StubParaphraser> {
    thresholds: Thresholds,
    paraphraser: P,
}

impl Evaluator<StubParaphraser> {
    pub fn new(thresholds: Thresholds) -> Self {
        Self::with_paraphraser(thresholds, StubParaphraser)
    }
}

impl Default for Evaluator<StubParaphraser> {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl<P: Paraphraser> Evaluator<P> {
    pub fn with_paraphraser(thresholds: Thresholds, paraphraser: P) -> Self {
        Self {
            thresholds,
            paraphraser,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Evaluate a single case. A missing output is treated as empty.
    pub fn evaluate_case(&self, case: &TestCase, outputs: &OutputMap) -> CaseResult {
        let model_output = outputs.get(&case.id).cloned().unwrap_or_default();
        let paraphrase_output = self.paraphraser.paraphrase(&model_output);

        let clarity_score = jaccard(&model_output, &paraphrase_output);
        let content_score = case
            .reference()
            .map(|expected| jaccard(&model_output, expected))
            .unwrap_or(1.0);

        let passed =
            clarity_score >= self.thresholds.clarity && content_score >= self.thresholds.content;

        debug!(
            case_id = %case.id,
            clarity_score,
            content_score,
            passed,
            has_output = outputs.contains_key(&case.id),
            "Case evaluated"
        );

        CaseResult {
            case_id: case.id.clone(),
            prompt: case.prompt.clone(),
            expected: case.expected.clone(),
            model_output,
            paraphrase_output,
            clarity_score,
            content_score,
            passed,
        }
    }

    /// Evaluate every case, preserving suite order.
    pub fn evaluate(&self, cases: &[TestCase], outputs: &OutputMap) -> Vec<CaseResult> {
        cases
            .iter()
            .map(|case| self.evaluate_case(case, outputs))
            .collect()
    }

    /// Aggregate results against this evaluator's error budget.
    pub fn summarize(&self, results: &[CaseResult]) -> Summary {
        summarize(results, self.thresholds.max_error_rate)
    }
}

/// Evaluate cases with the stub paraphraser and explicit per-case thresholds.
pub fn evaluate_cases(
    cases: &[TestCase],
    outputs: &OutputMap,
    clarity_threshold: f64,
    content_threshold: f64,
) -> Vec<CaseResult> {
    let thresholds = Thresholds {
        clarity: clarity_threshold,
        content: content_threshold,
        ..Thresholds::default()
    };
    Evaluator::new(thresholds).evaluate(cases, outputs)
}
