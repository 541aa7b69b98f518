//! File-level runners for the exam and welder, and the pipeline that
//! sequences them from a config file.

mod config;
mod io;
mod runner;

pub use config::{
    DataLayout, ExamStep, PipelineConfig, WelderStep, DEFAULT_OUTPUTS_DIR, DEFAULT_REPORT_PATH,
    DEFAULT_SUITES_DIR, DEFAULT_WELDED_PATH,
};
pub use io::{echo_json, read_text, write_pretty_json, IoError};
pub use runner::{run_exam, run_pipeline, run_welder, PipelineOutcome};

use thiserror::Error;

use crate::suite::SuiteError;
use crate::welder::WeldError;

/// Errors from running pipeline steps.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read pipeline config {path}: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pipeline config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pipeline config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid test suite {path}: {source}")]
    Suite {
        path: String,
        #[source]
        source: SuiteError,
    },

    #[error("Invalid model outputs {path}: {source}")]
    Outputs {
        path: String,
        #[source]
        source: SuiteError,
    },

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("Weld failed: {0}")]
    Weld(#[from] WeldError),
}
