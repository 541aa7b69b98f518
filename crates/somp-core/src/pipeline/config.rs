//! Pipeline configuration.
//!
//! ```yaml
//! exam:
//!   model: "demo-model"
//!   test_suite: "basic"
//!   clarity_threshold: 0.9
//! welder:
//!   input: "raw_output.txt"
//!   strict: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::suite::is_yaml;
use crate::types::{
    Thresholds, DEFAULT_CLARITY_THRESHOLD, DEFAULT_CONTENT_THRESHOLD, DEFAULT_MAX_ERROR_RATE,
};
use crate::welder::Policy;

use super::PipelineError;

pub const DEFAULT_REPORT_PATH: &str = "somp_exam_report.json";
pub const DEFAULT_WELDED_PATH: &str = "somp_welded.json";
pub const DEFAULT_SUITES_DIR: &str = "data/test_suites";
pub const DEFAULT_OUTPUTS_DIR: &str = "data/sample_outputs";

/// Steps to run, in order: exam, then welder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub exam: Option<ExamStep>,

    #[serde(default)]
    pub welder: Option<WelderStep>,

    /// Where bare suite names are looked up
    #[serde(default)]
    pub data: DataLayout,
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, PipelineError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a pipeline file, choosing the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| PipelineError::ReadConfig {
            path: path.display().to_string(),
            source,
        })?;
        if is_yaml(path) {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }
}

/// Language exam step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamStep {
    /// Model name under test (recorded in the report)
    pub model: String,

    /// Suite name or path to a suite file
    pub test_suite: String,

    /// Outputs file; defaults to the sample outputs for the suite
    #[serde(default)]
    pub outputs: Option<PathBuf>,

    #[serde(default = "default_clarity_threshold")]
    pub clarity_threshold: f64,

    #[serde(default = "default_content_threshold")]
    pub content_threshold: f64,

    #[serde(default = "default_max_error_rate")]
    pub max_error_rate: f64,

    #[serde(default = "default_report_path")]
    pub output_json: PathBuf,
}

impl ExamStep {
    pub fn new(model: impl Into<String>, test_suite: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            test_suite: test_suite.into(),
            outputs: None,
            clarity_threshold: DEFAULT_CLARITY_THRESHOLD,
            content_threshold: DEFAULT_CONTENT_THRESHOLD,
            max_error_rate: DEFAULT_MAX_ERROR_RATE,
            output_json: default_report_path(),
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            clarity: self.clarity_threshold,
            content: self.content_threshold,
            max_error_rate: self.max_error_rate,
        }
    }
}

/// Welder step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelderStep {
    /// Raw text or JSON file to normalize
    pub input: PathBuf,

    #[serde(default = "default_welded_path")]
    pub output: PathBuf,

    /// Reject instead of repairing a missing universal layer
    #[serde(default)]
    pub strict: bool,
}

impl WelderStep {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: default_welded_path(),
            strict: false,
        }
    }

    pub fn policy(&self) -> Policy {
        Policy::from(self.strict)
    }
}

/// Directory layout used to resolve bare suite names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataLayout {
    #[serde(default = "default_suites_dir")]
    pub suites_dir: PathBuf,

    #[serde(default = "default_outputs_dir")]
    pub outputs_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            suites_dir: default_suites_dir(),
            outputs_dir: default_outputs_dir(),
        }
    }
}

impl DataLayout {
    /// A suite given as a file path is used as-is; a bare name maps to
    /// `<suites_dir>/<name>.json`.
    pub fn resolve_suite(&self, test_suite: &str) -> PathBuf {
        if names_file(test_suite) {
            PathBuf::from(test_suite)
        } else {
            self.suites_dir.join(format!("{}.json", test_suite))
        }
    }

    /// Explicit outputs win; otherwise `<outputs_dir>/<suite stem>.json`.
    pub fn resolve_outputs(&self, test_suite: &str, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let stem = if names_file(test_suite) {
            Path::new(test_suite)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(test_suite)
        } else {
            test_suite
        };
        self.outputs_dir.join(format!("{}.json", stem))
    }
}

fn names_file(test_suite: &str) -> bool {
    Path::new(test_suite)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "json" | "yaml" | "yml"))
}

fn default_clarity_threshold() -> f64 {
    DEFAULT_CLARITY_THRESHOLD
}

fn default_content_threshold() -> f64 {
    DEFAULT_CONTENT_THRESHOLD
}

fn default_max_error_rate() -> f64 {
    DEFAULT_MAX_ERROR_RATE
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_welded_path() -> PathBuf {
    PathBuf::from(DEFAULT_WELDED_PATH)
}

fn default_suites_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SUITES_DIR)
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUTS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = PipelineConfig::from_json(
            r#"{"exam": {"model": "m", "test_suite": "basic"}, "welder": {"input": "raw.txt"}}"#,
        )
        .unwrap();

        let exam = config.exam.unwrap();
        assert_eq!(exam, ExamStep::new("m", "basic"));
        assert_eq!(exam.thresholds(), Thresholds::default());

        let welder = config.welder.unwrap();
        assert_eq!(welder.output, PathBuf::from(DEFAULT_WELDED_PATH));
        assert_eq!(welder.policy(), Policy::Lenient);
        assert_eq!(config.data, DataLayout::default());
    }

    #[test]
    fn test_empty_config_has_no_steps() {
        let config = PipelineConfig::from_json("{}").unwrap();
        assert!(config.exam.is_none());
        assert!(config.welder.is_none());
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
welder:
  input: "in.json"
  output: "out/welded.json"
  strict: true
data:
  suites_dir: "suites"
"#;
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        let welder = config.welder.unwrap();
        assert_eq!(welder.policy(), Policy::Strict);
        assert_eq!(config.data.suites_dir, PathBuf::from("suites"));
        assert_eq!(config.data.outputs_dir, PathBuf::from(DEFAULT_OUTPUTS_DIR));
    }

    #[test]
    fn test_exam_requires_model() {
        let result = PipelineConfig::from_json(r#"{"exam": {"test_suite": "basic"}}"#);
        assert!(matches!(result, Err(PipelineError::Json(_))));
    }

    #[test]
    fn test_json_error_keeps_source() {
        let err = PipelineConfig::from_json("{\n  \"welder\": 7\n}").unwrap_err();
        let PipelineError::Json(source) = &err else {
            panic!("expected a JSON error, got {err:?}");
        };
        assert_eq!(source.line(), 2);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_yaml_error_keeps_source() {
        let err = PipelineConfig::from_yaml("welder:\n  strict: maybe\n").unwrap_err();
        assert!(matches!(err, PipelineError::Yaml(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_resolve_bare_suite_name() {
        let data = DataLayout::default();
        assert_eq!(
            data.resolve_suite("basic"),
            PathBuf::from("data/test_suites/basic.json")
        );
        assert_eq!(
            data.resolve_outputs("basic", None),
            PathBuf::from("data/sample_outputs/basic.json")
        );
    }

    #[test]
    fn test_resolve_suite_path() {
        let data = DataLayout::default();
        assert_eq!(
            data.resolve_suite("suites/zh.yaml"),
            PathBuf::from("suites/zh.yaml")
        );
        assert_eq!(
            data.resolve_outputs("suites/zh.yaml", None),
            PathBuf::from("data/sample_outputs/zh.json")
        );
    }

    #[test]
    fn test_explicit_outputs_win() {
        let data = DataLayout::default();
        assert_eq!(
            data.resolve_outputs("basic", Some(Path::new("mine.json"))),
            PathBuf::from("mine.json")
        );
    }
}
