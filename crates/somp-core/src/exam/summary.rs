//! Aggregation of case results into a suite verdict.
//!
//! `error_rate = 1 - passed / total`, with the pass ratio taken as 0 when
//! there are no cases. An empty suite therefore has an error rate of 1.0 and
//! only passes under a budget of at least 1.0.

use crate::types::{CaseResult, Status, Summary};

/// Summarize results against the allowed error rate.
pub fn summarize(results: &[CaseResult], max_error_rate: f64) -> Summary {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    let pass_ratio = if total > 0 {
        passed as f64 / total as f64
    } else {
        0.0
    };
    let error_rate = 1.0 - pass_ratio;

    let status = if error_rate <= max_error_rate {
        Status::Pass
    } else {
        Status::Fail
    };

    Summary {
        total,
        passed,
        error_rate,
        max_error_rate,
        status,
    }
}
