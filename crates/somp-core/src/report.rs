//! Exam report presentation.
//!
//! Scores are rounded to four decimal places here and nowhere else; the
//! evaluator and summary keep full precision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CaseResult, Summary};

/// Decimal places kept in presented scores.
pub const SCORE_DECIMALS: usize = 4;

/// Round a score for presentation.
///
/// Rounds the exact binary value half-to-even, so `1/32` becomes `0.0312`.
pub fn round_score(value: f64) -> f64 {
    format!("{:.*}", SCORE_DECIMALS, value)
        .parse::<f64>()
        .unwrap_or(value)
}

/// One case as it appears in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub id: String,
    pub prompt: String,
    pub expected: Option<String>,
    pub model_output: String,
    pub paraphrase_output: String,
    pub clarity_score: f64,
    pub content_score: f64,
    pub passed: bool,
}

impl From<&CaseResult> for CaseReport {
    fn from(result: &CaseResult) -> Self {
        Self {
            id: result.case_id.clone(),
            prompt: result.prompt.clone(),
            expected: result.expected.clone(),
            model_output: result.model_output.clone(),
            paraphrase_output: result.paraphrase_output.clone(),
            clarity_score: round_score(result.clarity_score),
            content_score: round_score(result.content_score),
            passed: result.passed,
        }
    }
}

/// The full exam report written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamReport {
    /// Model under test
    pub model: String,

    /// Suite name as given by the caller
    pub suite: String,

    /// Summary with the error rate rounded
    pub summary: Summary,

    pub cases: Vec<CaseReport>,

    pub generated_at: DateTime<Utc>,
}

impl ExamReport {
    pub fn new(
        model: impl Into<String>,
        suite: impl Into<String>,
        results: &[CaseResult],
        summary: &Summary,
    ) -> Self {
        Self {
            model: model.into(),
            suite: suite.into(),
            summary: Summary {
                error_rate: round_score(summary.error_rate),
                ..summary.clone()
            },
            cases: results.iter().map(CaseReport::from).collect(),
            generated_at: Utc::now(),
        }
    }
}
