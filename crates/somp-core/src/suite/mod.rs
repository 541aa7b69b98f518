//! Test suite loading and validation.
//!
//! Suites are JSON (or YAML) documents validated against JSON Schema.
//! Malformed suites are fatal; a missing model output is not.

mod parser;
mod schema;

pub use parser::{outputs_from_file, outputs_from_json, SuiteError, TestSuite};
pub(crate) use parser::is_yaml;
pub use schema::validate_suite_schema;
