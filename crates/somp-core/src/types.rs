//! Core data types shared by the exam and the welder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Model outputs keyed by case id. Missing ids read as empty output.
pub type OutputMap = HashMap<String, String>;

/// Default minimum paraphrase-consistency score per case.
pub const DEFAULT_CLARITY_THRESHOLD: f64 = 0.9;

/// Default minimum content-alignment score per case.
pub const DEFAULT_CONTENT_THRESHOLD: f64 = 0.3;

/// Default maximum allowable error rate for a suite.
pub const DEFAULT_MAX_ERROR_RATE: f64 = 0.05;

/// A single prompt/expected-answer unit in a test suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Unique identifier within the suite
    pub id: String,

    /// Prompt shown to the model
    pub prompt: String,

    /// Reference answer, if any
    #[serde(default)]
    pub expected: Option<String>,
}

impl TestCase {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            expected: None,
        }
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// The reference answer, treating an empty string as absent.
    pub fn reference(&self) -> Option<&str> {
        self.expected.as_deref().filter(|e| !e.is_empty())
    }
}

/// Per-case thresholds plus the suite-level error budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub clarity: f64,
    pub content: f64,
    pub max_error_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            clarity: DEFAULT_CLARITY_THRESHOLD,
            content: DEFAULT_CONTENT_THRESHOLD,
            max_error_rate: DEFAULT_MAX_ERROR_RATE,
        }
    }
}

/// Outcome of evaluating one test case. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub case_id: String,
    pub prompt: String,
    pub expected: Option<String>,
    pub model_output: String,
    pub paraphrase_output: String,

    /// Jaccard similarity between the output and its paraphrase
    pub clarity_score: f64,

    /// Jaccard similarity between the output and the expected answer
    pub content_score: f64,

    pub passed: bool,
}

/// Overall exam verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn is_pass(&self) -> bool {
        matches!(self, Status::Pass)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
        }
    }
}

/// Aggregate over all case results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub error_rate: f64,
    pub max_error_rate: f64,
    pub status: Status,
}

/// The canonical intent/summary/confidence envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversalLayer {
    pub intent: String,
    pub summary: String,

    /// Always within [0, 1]
    pub confidence: f64,
}

/// A welded record: universal layer plus opaque pass-through payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub universal: UniversalLayer,
    pub specific: Value,
}

impl NormalizedRecord {
    /// The `specific` layer synthesized for raw-text payloads.
    pub fn raw_text_specific(text: &str) -> Value {
        let mut specific = Map::new();
        specific.insert("raw_text".to_string(), Value::String(text.to_string()));
        Value::Object(specific)
    }
}
