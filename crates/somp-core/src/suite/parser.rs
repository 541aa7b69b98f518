//! Test suite and model output parsing from YAML/JSON.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{OutputMap, TestCase};

use super::schema::validate_suite_schema;

/// Errors that can occur when loading suites or outputs.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Suite failed schema validation: {}", .0.join("; "))]
    SchemaViolation(Vec<String>),

    #[error("Duplicate case id: {0}")]
    DuplicateCaseId(String),

    #[error("Outputs must be a JSON object mapping case id to text")]
    InvalidOutputs,
}

/// An ordered list of test cases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestSuite {
    /// Cases in evaluation order
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(cases: Vec<TestCase>) -> Result<Self, SuiteError> {
        let suite = Self { cases };
        suite.validate_unique_ids()?;
        Ok(suite)
    }

    /// Build a suite from an untyped value, validating it against the schema.
    pub fn from_value(value: Value) -> Result<Self, SuiteError> {
        validate_suite_schema(&value).map_err(SuiteError::SchemaViolation)?;
        let suite: TestSuite = serde_json::from_value(value)?;
        suite.validate_unique_ids()?;
        Ok(suite)
    }

    /// Parse a suite from JSON string.
    pub fn from_json(json: &str) -> Result<Self, SuiteError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a suite from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SuiteError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Load a suite file, choosing the format by extension (`.yaml`/`.yml`
    /// parse as YAML, anything else as JSON).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if is_yaml(path) {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    fn validate_unique_ids(&self) -> Result<(), SuiteError> {
        let mut seen = HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.id.as_str()) {
                return Err(SuiteError::DuplicateCaseId(case.id.clone()));
            }
        }
        Ok(())
    }
}

/// Parse a model outputs document: a JSON object of case id to text.
pub fn outputs_from_json(json: &str) -> Result<OutputMap, SuiteError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(SuiteError::InvalidOutputs);
    }
    Ok(serde_json::from_value(value)?)
}

/// Load a model outputs file.
pub fn outputs_from_file(path: impl AsRef<Path>) -> Result<OutputMap, SuiteError> {
    let contents = fs::read_to_string(path)?;
    outputs_from_json(&contents)
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
