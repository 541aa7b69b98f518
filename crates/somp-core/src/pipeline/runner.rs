//! Step runners: load inputs, call the exam or welder, write artifacts.
//!
//! Every step either completes (artifact written, result echoed) or fails
//! before writing anything.

use std::io::Write;

use tracing::info;

use crate::exam::Evaluator;
use crate::report::ExamReport;
use crate::suite::{outputs_from_file, TestSuite};
use crate::types::NormalizedRecord;
use crate::welder::{normalize, Payload};

use super::config::{DataLayout, ExamStep, PipelineConfig, WelderStep};
use super::io::{echo_json, read_text, write_pretty_json};
use super::PipelineError;

/// Results of the steps that ran.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub exam: Option<ExamReport>,
    pub welder: Option<NormalizedRecord>,
}

/// Run the exam: write the full report, echo the summary.
pub fn run_exam<W: Write>(
    step: &ExamStep,
    data: &DataLayout,
    out: &mut W,
) -> Result<ExamReport, PipelineError> {
    let suite_path = data.resolve_suite(&step.test_suite);
    let suite = TestSuite::from_file(&suite_path).map_err(|source| PipelineError::Suite {
        path: suite_path.display().to_string(),
        source,
    })?;

    let outputs_path = data.resolve_outputs(&step.test_suite, step.outputs.as_deref());
    let outputs = outputs_from_file(&outputs_path).map_err(|source| PipelineError::Outputs {
        path: outputs_path.display().to_string(),
        source,
    })?;

    info!(
        model = %step.model,
        suite = %suite_path.display(),
        cases = suite.len(),
        outputs = outputs.len(),
        "Running exam"
    );

    let evaluator = Evaluator::new(step.thresholds());
    let results = evaluator.evaluate(&suite.cases, &outputs);
    let summary = evaluator.summarize(&results);
    let report = ExamReport::new(&step.model, &step.test_suite, &results, &summary);

    write_pretty_json(&step.output_json, &report)?;
    info!(
        status = summary.status.as_str(),
        passed = summary.passed,
        total = summary.total,
        report = %step.output_json.display(),
        "Exam report written"
    );

    echo_json(out, &report.summary)?;
    Ok(report)
}

/// Run the welder: write and echo the normalized record.
pub fn run_welder<W: Write>(step: &WelderStep, out: &mut W) -> Result<NormalizedRecord, PipelineError> {
    let raw = read_text(&step.input)?;
    let payload = Payload::parse(raw.trim())?;
    let record = normalize(&payload, step.policy())?;

    write_pretty_json(&step.output, &record)?;
    info!(
        input = %step.input.display(),
        output = %step.output.display(),
        strict = step.strict,
        "Welded record written"
    );

    echo_json(out, &record)?;
    Ok(record)
}

/// Run the configured steps in order: exam, then welder.
pub fn run_pipeline<W: Write>(
    config: &PipelineConfig,
    out: &mut W,
) -> Result<PipelineOutcome, PipelineError> {
    let mut outcome = PipelineOutcome::default();

    if let Some(exam) = &config.exam {
        outcome.exam = Some(run_exam(exam, &config.data, out)?);
    }

    if let Some(welder) = &config.welder {
        outcome.welder = Some(run_welder(welder, out)?);
    }

    if outcome.exam.is_none() && outcome.welder.is_none() {
        info!("Pipeline has no steps configured");
    }

    Ok(outcome)
}
