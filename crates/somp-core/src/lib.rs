//! # somp-core
//!
//! Deterministic language exam and universal-layer welder for model outputs.
//!
//! This crate answers two questions about a model:
//! - Does its output survive rephrasing and match the reference answers?
//! - Can its raw response be welded into a `{universal, specific}` record?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same suite and outputs always produce the same scores
//! 2. **No model calls**: Paraphrasing is a local stub behind [`Paraphraser`]
//! 3. **Pure core**: Evaluation and normalization hold no cross-call state
//! 4. **Fail fast**: Malformed suites and payloads abort before any output
//!
//! ## Example
//!
//! ```rust,ignore
//! use somp_core::{examine, normalize_value, OutputMap, Policy, TestSuite, Thresholds};
//!
//! let suite = TestSuite::from_file("data/test_suites/basic.json")?;
//! let outputs: OutputMap = [("greeting".into(), "Hello world".into())].into();
//! let report = examine("demo-model", "basic", &suite, &outputs, Thresholds::default());
//! println!("{}", report.summary.status.as_str());
//!
//! let record = normalize_value(serde_json::json!("  Hello  "), Policy::Lenient)?;
//! assert_eq!(record.universal.summary, "Hello");
//! ```

pub mod exam;
pub mod pipeline;
pub mod report;
pub mod suite;
pub mod types;
pub mod welder;

// Re-export main types at crate root
pub use exam::{
    evaluate_cases, jaccard, paraphrase, summarize, tokenize, Evaluator, Paraphraser,
    StubParaphraser,
};
pub use pipeline::{
    run_exam, run_pipeline, run_welder, ExamStep, PipelineConfig, PipelineError, WelderStep,
};
pub use report::{CaseReport, ExamReport};
pub use suite::{SuiteError, TestSuite};
pub use types::{
    CaseResult, NormalizedRecord, OutputMap, Status, Summary, TestCase, Thresholds,
    UniversalLayer,
};
pub use welder::{normalize, normalize_value, Payload, Policy, WeldError};

/// Run a complete exam over a suite and build its report.
///
/// This is the main in-memory entry point: no files are read or written.
pub fn examine(
    model: &str,
    suite_name: &str,
    suite: &TestSuite,
    outputs: &OutputMap,
    thresholds: Thresholds,
) -> ExamReport {
    let evaluator = Evaluator::new(thresholds);
    let results = evaluator.evaluate(&suite.cases, outputs);
    let summary = evaluator.summarize(&results);
    ExamReport::new(model, suite_name, &results, &summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_case_exam() {
        let suite = TestSuite::from_json(
            r#"{"cases": [{"id": "c1", "prompt": "p", "expected": "hello world"}]}"#,
        )
        .unwrap();
        let outputs: OutputMap = [("c1".to_string(), "hello world".to_string())].into();

        let report = examine("model", "suite", &suite, &outputs, Thresholds::default());

        assert_eq!(report.summary.total, 1);
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.error_rate, 0.0);
        assert_eq!(report.summary.status, Status::Pass);
        assert_eq!(report.cases[0].clarity_score, 1.0);
        assert_eq!(report.cases[0].content_score, 1.0);
    }

    #[test]
    fn test_cjk_exam_fails_on_wrong_answer() {
        let suite = TestSuite::from_json(
            r#"{"cases": [{"id": "zh", "prompt": "首都？", "expected": "北京"}]}"#,
        )
        .unwrap();
        let outputs: OutputMap = [("zh".to_string(), "上海。".to_string())].into();

        let report = examine("model", "zh", &suite, &outputs, Thresholds::default());

        assert_eq!(report.cases[0].content_score, 0.0);
        assert!(!report.cases[0].passed);
        assert_eq!(report.summary.status, Status::Fail);
    }
}
