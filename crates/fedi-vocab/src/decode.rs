//! Decode engine: wire bytes → [`Node`].
//!
//! The input is parsed once; every fragment of the selected variant then reads
//! its own keys from that shared map. Polymorphic fields recurse back into
//! [`decode_node`], which is where the nesting bound is enforced.

use serde_json::error::Category;
use serde_json::{Map, Value};

use crate::document::CONTEXT_KEY;
use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::registry::Registry;
use crate::vocab::Node;
use crate::wire::{DecodeCx, WireDecode};

pub(crate) const TYPE_KEY: &str = "type";
pub(crate) const ID_KEY: &str = "id";

/// Decode `bytes` with default options.
pub fn decode(bytes: &[u8], registry: &Registry) -> Result<Node, CodecError> {
    decode_with(bytes, registry, &CodecOptions::default())
}

pub fn decode_with(
    bytes: &[u8],
    registry: &Registry,
    options: &CodecOptions,
) -> Result<Node, CodecError> {
    let value = parse(bytes, options)?;
    from_value(&value, registry, options)
}

/// Decode an already parsed wire tree.
pub fn from_value(
    value: &Value,
    registry: &Registry,
    options: &CodecOptions,
) -> Result<Node, CodecError> {
    let mut cx = DecodeCx::new(registry, options);
    decode_node(value, &mut cx)
}

/// Parse raw bytes into a wire tree.
///
/// Input nested past what the parser accepts is reported as
/// [`CodecError::DepthLimitExceeded`], like input past the node bound.
pub fn parse(bytes: &[u8], options: &CodecOptions) -> Result<Value, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| {
        if is_recursion_limit(&e) {
            let max_depth = options.depth_limit();
            tracing::warn!(max_depth, "nesting depth limit exceeded while parsing");
            CodecError::DepthLimitExceeded(max_depth)
        } else {
            CodecError::TypeMismatch {
                expected: "JSON document",
                found: e.to_string(),
            }
        }
    })
}

fn is_recursion_limit(e: &serde_json::Error) -> bool {
    e.classify() == Category::Syntax && e.to_string().contains("recursion limit exceeded")
}

/// Decode one polymorphic value: an object selected by its discriminator, or a
/// bare string taken as a reference.
pub fn decode_node(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Node, CodecError> {
    cx.descend(|cx| match value {
        Value::Object(map) => decode_object(map, cx),
        Value::String(id) => Ok(Node::reference(id.as_str())),
        other => Err(CodecError::mismatch("object or reference", other)),
    })
}

fn decode_object(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Node, CodecError> {
    let registry = cx.registry();
    let discriminator = match discriminator_of(map, registry)? {
        Some(discriminator) => discriminator,
        None => {
            return match bare_reference(map) {
                Some(id) => Ok(Node::reference(id)),
                None => Err(CodecError::MissingDiscriminator),
            }
        }
    };
    tracing::trace!(discriminator, depth = cx.depth(), "decoding node");
    let decode = registry.resolve_for(discriminator, map)?;
    decode(map, cx)
}

/// Read the `type` key. An array of types selects its first registered entry,
/// falling back to the first entry so the error names it. An array with no
/// string entry carries no discriminator.
fn discriminator_of<'m>(
    map: &'m Map<String, Value>,
    registry: &Registry,
) -> Result<Option<&'m str>, CodecError> {
    match map.get(TYPE_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.as_str())),
        Some(Value::Array(names)) => {
            let names: Vec<&str> = names.iter().filter_map(Value::as_str).collect();
            let first = names
                .first()
                .copied()
                .ok_or(CodecError::MissingDiscriminator)?;
            let chosen = names
                .iter()
                .copied()
                .find(|name| registry.contains(name))
                .unwrap_or(first);
            Ok(Some(chosen))
        }
        Some(other) => Err(CodecError::mismatch("discriminator string", other)),
    }
}

/// An untyped object holding only an `id` (and possibly `@context`).
fn bare_reference(map: &Map<String, Value>) -> Option<&str> {
    let id = map.get(ID_KEY)?.as_str()?;
    map.keys()
        .all(|k| k == ID_KEY || k == CONTEXT_KEY)
        .then_some(id)
}

impl WireDecode for Node {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        decode_node(value, cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{vocabulary, ObjectType};
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn bare_string_is_reference() {
        let registry = vocabulary();
        let node = decode(br#""http://ex.org/1""#, &registry).unwrap();
        assert_eq!(node, Node::reference("http://ex.org/1"));
    }

    #[test]
    fn number_is_type_mismatch() {
        let registry = vocabulary();
        let err = decode(b"17", &registry).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn untyped_object_with_extra_keys_is_missing_discriminator() {
        let registry = vocabulary();
        let err = decode(br#"{"id": "x", "content": "hi"}"#, &registry).unwrap_err();
        assert_eq!(err, CodecError::MissingDiscriminator);
    }

    #[test]
    fn non_string_discriminator_is_type_mismatch() {
        let registry = vocabulary();
        let err = decode(br#"{"type": 5}"#, &registry).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn type_array_uses_first_registered_entry() {
        let registry = vocabulary();
        let node = decode(br#"{"type": ["ext:Thing", "Note"], "id": "n"}"#, &registry).unwrap();
        assert!(matches!(node, Node::Object(ObjectType::Note, _)));
    }

    #[test]
    fn type_array_without_known_entry_names_the_first() {
        let registry = vocabulary();
        let err = decode(br#"{"type": ["ext:Thing", "ext:Other"]}"#, &registry).unwrap_err();
        assert_eq!(err, CodecError::UnknownDiscriminator("ext:Thing".into()));
    }

    #[test]
    fn type_array_without_strings_is_missing_discriminator() {
        let registry = vocabulary();
        let inputs: [&[u8]; 2] = [br#"{"type": []}"#, br#"{"type": [5], "id": "x"}"#];
        for input in inputs {
            let err = decode(input, &registry).unwrap_err();
            assert_eq!(err, CodecError::MissingDiscriminator);
        }
    }

    #[test]
    fn parser_recursion_limit_is_depth_limit() {
        let bytes = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let options = CodecOptions::default().with_max_depth(9);
        assert_eq!(
            parse(bytes.as_bytes(), &options),
            Err(CodecError::DepthLimitExceeded(9))
        );
        let err = parse(b"{\"type\": ", &options).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn depth_limit_applies_to_nested_nodes() {
        let registry = vocabulary();
        let mut value = json!({"type": "Note"});
        for _ in 0..10 {
            value = json!({"type": "Note", "context": value});
        }
        let options = CodecOptions::default().with_max_depth(5);
        let err = from_value(&value, &registry, &options).unwrap_err();
        assert_eq!(err, CodecError::DepthLimitExceeded(5));

        let roomy = CodecOptions::default().with_max_depth(11);
        assert!(from_value(&value, &registry, &roomy).is_ok());
    }

    #[traced_test]
    #[test]
    fn depth_limit_is_logged() {
        let registry = vocabulary();
        let value = json!({"type": "Note", "context": {"type": "Note"}});
        let options = CodecOptions::default().with_max_depth(1);
        assert!(from_value(&value, &registry, &options).is_err());
        assert!(logs_contain("nesting depth limit exceeded"));
    }

    #[traced_test]
    #[test]
    fn unknown_discriminator_is_logged() {
        let registry = vocabulary();
        let err = decode(br#"{"type": "Bogus"}"#, &registry).unwrap_err();
        assert_eq!(err, CodecError::UnknownDiscriminator("Bogus".into()));
        assert!(logs_contain("unknown discriminator"));
    }
}
