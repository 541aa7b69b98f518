//! The welder: normalizes model responses into `{universal, specific}`.
//!
//! Text or JSON goes in; a record with a validated universal layer and an
//! untouched specific layer comes out. Whether gaps are repaired or
//! rejected is decided by [`Policy`].

mod normalizer;
mod payload;

pub use normalizer::{
    clamp_unit, coerce_confidence, infer_universal, normalize, normalize_universal,
    normalize_value, Policy, DEFAULT_CONFIDENCE, DEFAULT_INTENT, SUMMARY_PLACEHOLDER,
};
pub use payload::Payload;

use thiserror::Error;

/// Errors raised while welding a payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeldError {
    #[error("Input payload must be a JSON object or string, found {found}")]
    InvalidPayloadType { found: &'static str },

    #[error("Missing universal layer")]
    MissingUniversal,

    #[error("Universal layer missing required fields")]
    MissingRequiredFields,
}
