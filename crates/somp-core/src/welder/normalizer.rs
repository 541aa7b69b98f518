//! Coercion of payloads into `{universal, specific}` records.
//!
//! | Payload | Strict | Lenient |
//! |---------|--------|---------|
//! | raw text | universal inferred | universal inferred |
//! | object with `universal` object | coerced | coerced |
//! | object without `universal` object | **error** | inferred from the whole payload |
//! | coerced `intent`/`summary` empty | **error** | kept as-is |

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{NormalizedRecord, UniversalLayer};

use super::payload::{json_kind, Payload};
use super::WeldError;

/// Intent used when none is supplied.
pub const DEFAULT_INTENT: &str = "unspecified";

/// Summary used when none is supplied or the source text is blank.
pub const SUMMARY_PLACEHOLDER: &str = "no summary";

/// Confidence used when none is supplied or it cannot be parsed.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// How the welder reacts to a missing or incomplete universal layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Reject instead of inferring
    Strict,

    /// Infer and repair
    #[default]
    Lenient,
}

impl Policy {
    pub fn is_strict(self) -> bool {
        matches!(self, Policy::Strict)
    }
}

impl From<bool> for Policy {
    fn from(strict: bool) -> Self {
        if strict {
            Policy::Strict
        } else {
            Policy::Lenient
        }
    }
}

/// Normalize a payload into a canonical record.
pub fn normalize(payload: &Payload, policy: Policy) -> Result<NormalizedRecord, WeldError> {
    match payload {
        Payload::RawText(text) => Ok(NormalizedRecord {
            universal: infer_universal(text),
            specific: NormalizedRecord::raw_text_specific(text),
        }),
        Payload::Structured(map) => {
            let fallback = to_spaced_json(&Value::Object(map.clone()));
            let universal = normalize_universal(map.get("universal"), &fallback, policy)?;
            let specific = map
                .get("specific")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));

            Ok(NormalizedRecord {
                universal,
                specific,
            })
        }
    }
}

/// Normalize an untyped JSON value. Anything other than a string or an
/// object fails regardless of policy.
pub fn normalize_value(value: Value, policy: Policy) -> Result<NormalizedRecord, WeldError> {
    let payload = Payload::from_value(value)?;
    normalize(&payload, policy)
}

/// Validate and coerce a universal layer.
///
/// `fallback_text` seeds the inferred summary when the layer is absent or
/// not an object and the policy is lenient.
pub fn normalize_universal(
    universal: Option<&Value>,
    fallback_text: &str,
    policy: Policy,
) -> Result<UniversalLayer, WeldError> {
    let layer = match universal {
        Some(Value::Object(fields)) => coerce_fields(fields),
        other => {
            if policy.is_strict() {
                return Err(WeldError::MissingUniversal);
            }
            warn!(
                found = other.map(json_kind).unwrap_or("nothing"),
                "Universal layer missing, inferring from payload"
            );
            infer_universal(fallback_text)
        }
    };

    if policy.is_strict() && (layer.intent.is_empty() || layer.summary.is_empty()) {
        return Err(WeldError::MissingRequiredFields);
    }

    Ok(layer)
}

/// Build a universal layer from free text.
pub fn infer_universal(text: &str) -> UniversalLayer {
    let trimmed = text.trim();
    let summary = if trimmed.is_empty() {
        SUMMARY_PLACEHOLDER
    } else {
        trimmed
    };

    UniversalLayer {
        intent: DEFAULT_INTENT.to_string(),
        summary: summary.to_string(),
        confidence: DEFAULT_CONFIDENCE,
    }
}

fn coerce_fields(fields: &Map<String, Value>) -> UniversalLayer {
    UniversalLayer {
        intent: coerce_string(fields.get("intent"), DEFAULT_INTENT),
        summary: coerce_string(fields.get("summary"), SUMMARY_PLACEHOLDER),
        confidence: coerce_confidence(fields.get("confidence")),
    }
}

/// Strings pass through and null or absent take the default. Booleans
/// become `True`/`False`; other values use their JSON text.
fn coerce_string(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "True" } else { "False" }.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Parse a confidence value and clamp it into [0, 1].
pub fn coerce_confidence(value: Option<&Value>) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(_) => None,
    };

    match parsed {
        Some(confidence) if !confidence.is_nan() => clamp_unit(confidence),
        _ => {
            if let Some(raw) = value.filter(|v| !v.is_null()) {
                warn!(confidence = %raw, "Unparseable confidence, using default");
            }
            DEFAULT_CONFIDENCE
        }
    }
}

/// JSON text with `", "` between items and `": "` after keys. Non-ASCII
/// characters are written as-is.
pub fn to_spaced_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Clamp into the closed unit interval.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_text_infers_universal() {
        let record = normalize(&Payload::text("  Hello  "), Policy::Lenient).unwrap();

        assert_eq!(record.universal.intent, "unspecified");
        assert_eq!(record.universal.summary, "Hello");
        assert_eq!(record.universal.confidence, 0.5);
        assert_eq!(record.specific, json!({"raw_text": "  Hello  "}));
    }

    #[test]
    fn test_blank_text_uses_placeholder() {
        let record = normalize(&Payload::text("   "), Policy::Strict).unwrap();
        assert_eq!(record.universal.summary, SUMMARY_PLACEHOLDER);
    }

    #[test]
    fn test_missing_universal_strict_fails() {
        let result = normalize_value(json!({"specific": {"x": 1}}), Policy::Strict);
        assert!(matches!(result, Err(WeldError::MissingUniversal)));
    }

    #[test]
    fn test_missing_universal_lenient_infers() {
        let record = normalize_value(json!({"specific": {"x": 1}}), Policy::Lenient).unwrap();

        assert_eq!(record.universal.intent, "unspecified");
        assert_eq!(record.universal.summary, r#"{"specific": {"x": 1}}"#);
        assert_eq!(record.universal.confidence, 0.5);
        assert_eq!(record.specific, json!({"x": 1}));
    }

    #[test]
    fn test_spaced_json_separators() {
        let value = json!({"a": [1, 2, {"b": null}], "c": "北京", "d": {}, "e": []});
        assert_eq!(
            to_spaced_json(&value),
            r#"{"a": [1, 2, {"b": null}], "c": "北京", "d": {}, "e": []}"#
        );
    }

    #[test]
    fn test_non_object_universal_treated_as_missing() {
        let payload = json!({"universal": "not a layer"});
        assert!(matches!(
            normalize_value(payload.clone(), Policy::Strict),
            Err(WeldError::MissingUniversal)
        ));
        let record = normalize_value(payload, Policy::Lenient).unwrap();
        assert_eq!(record.universal.intent, DEFAULT_INTENT);
    }

    #[test]
    fn test_supplied_universal_is_coerced() {
        let record = normalize_value(
            json!({
                "universal": {"intent": "answer", "summary": "The sky is blue", "confidence": "0.8"},
                "specific": {"sources": ["a", "b"]}
            }),
            Policy::Strict,
        )
        .unwrap();

        assert_eq!(record.universal.intent, "answer");
        assert_eq!(record.universal.summary, "The sky is blue");
        assert_eq!(record.universal.confidence, 0.8);
        assert_eq!(record.specific, json!({"sources": ["a", "b"]}));
    }

    #[test]
    fn test_absent_fields_take_defaults() {
        let record = normalize_value(json!({"universal": {}}), Policy::Strict).unwrap();
        assert_eq!(record.universal.intent, DEFAULT_INTENT);
        assert_eq!(record.universal.summary, SUMMARY_PLACEHOLDER);
        assert_eq!(record.universal.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(record.specific, json!({}));
    }

    #[test]
    fn test_non_string_fields_are_stringified() {
        let record =
            normalize_value(json!({"universal": {"intent": 7, "summary": true}}), Policy::Lenient)
                .unwrap();
        assert_eq!(record.universal.intent, "7");
        assert_eq!(record.universal.summary, "True");
    }

    #[test]
    fn test_bool_fields_use_capitalized_text() {
        let record = normalize_value(
            json!({"universal": {"intent": false, "summary": true}}),
            Policy::Strict,
        )
        .unwrap();
        assert_eq!(record.universal.intent, "False");
        assert_eq!(record.universal.summary, "True");
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(coerce_confidence(Some(&json!(1.7))), 1.0);
        assert_eq!(coerce_confidence(Some(&json!(-3))), 0.0);
        assert_eq!(coerce_confidence(Some(&json!(0.25))), 0.25);
    }

    #[test]
    fn test_confidence_unparseable_defaults() {
        assert_eq!(coerce_confidence(Some(&json!("high"))), DEFAULT_CONFIDENCE);
        assert_eq!(coerce_confidence(Some(&json!([0.9]))), DEFAULT_CONFIDENCE);
        assert_eq!(coerce_confidence(Some(&json!("NaN"))), DEFAULT_CONFIDENCE);
        assert_eq!(coerce_confidence(None), DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_strict_rejects_empty_required_fields() {
        let result = normalize_value(
            json!({"universal": {"intent": "", "summary": "ok"}}),
            Policy::Strict,
        );
        assert!(matches!(result, Err(WeldError::MissingRequiredFields)));

        let result = normalize_value(
            json!({"universal": {"intent": "x", "summary": ""}}),
            Policy::Strict,
        );
        assert!(matches!(result, Err(WeldError::MissingRequiredFields)));
    }

    #[test]
    fn test_lenient_keeps_empty_fields() {
        let record = normalize_value(
            json!({"universal": {"intent": "", "summary": ""}}),
            Policy::Lenient,
        )
        .unwrap();
        assert_eq!(record.universal.intent, "");
        assert_eq!(record.universal.summary, "");
    }

    #[test]
    fn test_invalid_type_fails_in_both_modes() {
        for policy in [Policy::Strict, Policy::Lenient] {
            assert!(matches!(
                normalize_value(json!(42), policy),
                Err(WeldError::InvalidPayloadType { found: "number" })
            ));
        }
    }

    #[test]
    fn test_specific_passed_through_unchanged() {
        let specific = json!({"z": [1, {"nested": null}], "a": "first"});
        let record = normalize_value(
            json!({"universal": {"intent": "i", "summary": "s"}, "specific": specific.clone()}),
            Policy::Strict,
        )
        .unwrap();
        assert_eq!(record.specific, specific);
        assert_eq!(
            serde_json::to_string(&record.specific).unwrap(),
            serde_json::to_string(&specific).unwrap()
        );
    }

    #[test]
    fn test_policy_from_bool() {
        assert_eq!(Policy::from(true), Policy::Strict);
        assert_eq!(Policy::from(false), Policy::Lenient);
        assert_eq!(Policy::default(), Policy::Lenient);
    }
}
