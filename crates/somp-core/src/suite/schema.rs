//! JSON Schema validation for test suites.
//!
//! Suites are validated against schemas/test_suite.schema.json before typed
//! deserialization, so a case missing `id` or `prompt` is reported with its
//! location rather than as a bare serde error.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded suite schema (loaded at compile time).
const SUITE_SCHEMA_JSON: &str = include_str!("../../../../schemas/test_suite.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(SUITE_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Validate a suite JSON value against the schema.
///
/// Returns every violation, each suffixed with its instance path.
pub fn validate_suite_schema(suite_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(suite_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_suite_passes() {
        let value = serde_json::json!({
            "cases": [
                { "id": "c1", "prompt": "Say hello", "expected": "hello" },
                { "id": "c2", "prompt": "Anything" },
                { "id": "c3", "prompt": "Null reference", "expected": null }
            ]
        });
        assert!(validate_suite_schema(&value).is_ok());
    }

    #[test]
    fn test_empty_object_passes() {
        assert!(validate_suite_schema(&serde_json::json!({})).is_ok());
    }

    #[test]
    fn test_missing_id_fails() {
        let value = serde_json::json!({
            "cases": [ { "prompt": "No id" } ]
        });
        let errors = validate_suite_schema(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("/cases/0")));
    }

    #[test]
    fn test_missing_prompt_fails() {
        let value = serde_json::json!({
            "cases": [ { "id": "c1" } ]
        });
        assert!(validate_suite_schema(&value).is_err());
    }

    #[test]
    fn test_empty_id_passes() {
        let value = serde_json::json!({
            "cases": [ { "id": "", "prompt": "p" } ]
        });
        assert!(validate_suite_schema(&value).is_ok());
    }

    #[test]
    fn test_non_string_expected_fails() {
        let value = serde_json::json!({
            "cases": [ { "id": "c1", "prompt": "p", "expected": 42 } ]
        });
        assert!(validate_suite_schema(&value).is_err());
    }

    #[test]
    fn test_cases_must_be_array() {
        let value = serde_json::json!({ "cases": { "id": "c1" } });
        assert!(validate_suite_schema(&value).is_err());
    }
}
