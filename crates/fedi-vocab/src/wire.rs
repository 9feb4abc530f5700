//! Conversion between typed values and the JSON wire tree.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::registry::Registry;

/// Per-call decode state: the registry and the remaining nesting budget.
pub struct DecodeCx<'r> {
    registry: &'r Registry,
    max_depth: usize,
    depth: usize,
}

impl<'r> DecodeCx<'r> {
    pub fn new(registry: &'r Registry, options: &CodecOptions) -> Self {
        Self {
            registry,
            max_depth: options.depth_limit(),
            depth: 0,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Number of nodes currently being decoded above this point.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run `f` one node deeper, failing once the configured bound is reached.
    pub fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        if self.depth >= self.max_depth {
            tracing::warn!(max_depth = self.max_depth, "nesting depth limit exceeded");
            return Err(CodecError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// A value that can be written as a wire value.
pub trait WireEncode {
    fn encode_wire(&self) -> Result<Value, CodecError>;

    /// Optional fields holding their default are left out of the output.
    fn is_default(&self) -> bool {
        false
    }
}

/// A value that can be structurally decoded from a wire value.
pub trait WireDecode: Sized {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError>;
}

impl WireEncode for String {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        Ok(Value::String(self.clone()))
    }
}

impl WireDecode for String {
    fn decode_wire(value: &Value, _cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CodecError::mismatch("string", value))
    }
}

impl WireEncode for str {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        Ok(Value::String(self.to_string()))
    }
}

impl WireEncode for bool {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        Ok(Value::Bool(*self))
    }
}

impl WireDecode for bool {
    fn decode_wire(value: &Value, _cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        value
            .as_bool()
            .ok_or_else(|| CodecError::mismatch("boolean", value))
    }
}

impl WireEncode for u64 {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        Ok(Value::Number(Number::from(*self)))
    }
}

impl WireDecode for u64 {
    fn decode_wire(value: &Value, _cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        value
            .as_u64()
            .ok_or_else(|| CodecError::mismatch("non-negative integer", value))
    }
}

impl WireEncode for f64 {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or_else(|| CodecError::UnsupportedShape(format!("non-finite number {self}")))
    }
}

impl WireDecode for f64 {
    fn decode_wire(value: &Value, _cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        value
            .as_f64()
            .ok_or_else(|| CodecError::mismatch("number", value))
    }
}

impl WireEncode for DateTime<Utc> {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        Ok(Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
    }
}

impl WireDecode for DateTime<Utc> {
    fn decode_wire(value: &Value, _cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        let text = value
            .as_str()
            .ok_or_else(|| CodecError::mismatch("RFC 3339 timestamp", value))?;
        DateTime::parse_from_rfc3339(text)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| CodecError::TypeMismatch {
                expected: "RFC 3339 timestamp",
                found: format!("{text:?} ({e})"),
            })
    }
}

impl WireEncode for BTreeMap<String, String> {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        let map: Map<String, Value> = self
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Ok(Value::Object(map))
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl WireDecode for BTreeMap<String, String> {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        let map = value
            .as_object()
            .ok_or_else(|| CodecError::mismatch("language map", value))?;
        let mut out = BTreeMap::new();
        for (lang, text) in map {
            out.insert(lang.clone(), String::decode_wire(text, cx)?);
        }
        Ok(out)
    }
}

impl<T: WireEncode> WireEncode for Option<T> {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        match self {
            Some(v) => v.encode_wire(),
            None => Ok(Value::Null),
        }
    }

    fn is_default(&self) -> bool {
        self.is_none()
    }
}

impl<T: WireDecode> WireDecode for Option<T> {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        if value.is_null() {
            return Ok(None);
        }
        T::decode_wire(value, cx).map(Some)
    }
}

impl<T: WireEncode> WireEncode for Vec<T> {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        self.iter()
            .map(|item| item.encode_wire())
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<T: WireDecode> WireDecode for Vec<T> {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        let items = value
            .as_array()
            .ok_or_else(|| CodecError::mismatch("array", value))?;
        items.iter().map(|item| T::decode_wire(item, cx)).collect()
    }
}

impl<T: WireEncode + ?Sized> WireEncode for Box<T> {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        (**self).encode_wire()
    }

    fn is_default(&self) -> bool {
        (**self).is_default()
    }
}

impl<T: WireDecode> WireDecode for Box<T> {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        T::decode_wire(value, cx).map(Box::new)
    }
}
