use thiserror::Error;

/// Every failure the codec can report. Errors are plain values; nothing in the
/// encode or decode path panics on caller input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("unknown discriminator: {0}")]
    UnknownDiscriminator(String),

    #[error("missing discriminator")]
    MissingDiscriminator,

    #[error("{fragment}: missing required field `{key}`")]
    MissingRequiredField {
        fragment: &'static str,
        key: &'static str,
    },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("neither union alternative decoded (left: {left}; right: {right})")]
    AmbiguousUnion {
        left: Box<CodecError>,
        right: Box<CodecError>,
    },

    #[error("no entity set")]
    NoEntitySet,

    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),
}

impl CodecError {
    pub(crate) fn mismatch(expected: &'static str, found: &serde_json::Value) -> Self {
        CodecError::TypeMismatch {
            expected,
            found: json_kind(found).to_string(),
        }
    }
}

/// Name of a JSON value's kind, used in mismatch messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
