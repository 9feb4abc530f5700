//! Top-level documents: a node plus its `@context`.

use serde_json::{Map, Value};

use crate::decode::parse;
use crate::encode::{to_bytes, to_map};
use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::registry::Registry;
use crate::vocab::{Entity, Node};
use crate::wire::DecodeCx;

/// Key holding a document's JSON-LD context.
pub const CONTEXT_KEY: &str = "@context";

/// JSON-LD context of the ActivityStreams 2.0 vocabulary.
pub const ACTIVITY_STREAMS_CONTEXT: &str = "https://www.w3.org/ns/activitystreams";

/// Wraps a node for emission as a standalone document.
#[derive(Debug, Clone, PartialEq)]
pub struct TopLevelEntity<'a> {
    context: Value,
    entity: Option<&'a Node>,
}

impl<'a> TopLevelEntity<'a> {
    pub fn new(context: impl Into<Value>, entity: &'a Node) -> Self {
        Self {
            context: context.into(),
            entity: Some(entity),
        }
    }

    /// Wrap `entity` under the ActivityStreams context.
    pub fn activity_streams(entity: &'a Node) -> Self {
        Self::new(ACTIVITY_STREAMS_CONTEXT, entity)
    }

    /// A document with a context but nothing to emit yet.
    pub fn empty(context: impl Into<Value>) -> Self {
        Self {
            context: context.into(),
            entity: None,
        }
    }

    pub fn set_entity(&mut self, entity: &'a Node) {
        self.entity = Some(entity);
    }

    pub fn entity(&self) -> Option<&'a Node> {
        self.entity
    }

    pub fn context(&self) -> &Value {
        &self.context
    }

    /// `@context` followed by the entity's flattened fields.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        let entity = self.entity.ok_or(CodecError::NoEntitySet)?;
        let fields = to_map(entity)?;
        let mut map = Map::with_capacity(fields.len() + 1);
        map.insert(CONTEXT_KEY.to_string(), self.context.clone());
        map.extend(fields);
        Ok(Value::Object(map))
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        to_bytes(&self.to_value()?)
    }
}

impl Entity for TopLevelEntity<'_> {
    fn id(&self) -> Option<&str> {
        self.entity.and_then(Node::id)
    }

    fn discriminator(&self) -> Option<&'static str> {
        self.entity.and_then(Node::discriminator)
    }
}

/// A decoded document and the context it declared.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDocument {
    /// `None` when the document carried no `@context`.
    pub context: Option<Value>,
    pub entity: Node,
}

pub fn decode_document(
    bytes: &[u8],
    registry: &Registry,
    options: &CodecOptions,
) -> Result<DecodedDocument, CodecError> {
    let value = parse(bytes, options)?;
    let context = value
        .as_object()
        .and_then(|map| map.get(CONTEXT_KEY))
        .filter(|v| !v.is_null())
        .cloned();
    let mut cx = DecodeCx::new(registry, options);
    let entity = crate::decode::decode_node(&value, &mut cx)?;
    Ok(DecodedDocument { context, entity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{vocabulary, ActorNode, ActorType, EntityProps};
    use serde_json::json;

    fn person() -> Node {
        Node::Actor(
            ActorType::Person,
            ActorNode {
                entity: EntityProps::new("http://ex.org/u/alice"),
                ..Default::default()
            },
        )
    }

    #[test]
    fn context_is_written_first() {
        let node = person();
        let doc = TopLevelEntity::activity_streams(&node);
        let value = doc.to_value().unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["@context", "type", "id"]);
        assert_eq!(value["@context"], json!(ACTIVITY_STREAMS_CONTEXT));
    }

    #[test]
    fn empty_document_has_no_entity_set() {
        let doc = TopLevelEntity::empty(ACTIVITY_STREAMS_CONTEXT);
        assert_eq!(doc.encode(), Err(CodecError::NoEntitySet));
        assert_eq!(Entity::id(&doc), None);
        assert_eq!(Entity::discriminator(&doc), None);
    }

    #[test]
    fn capabilities_delegate_to_entity() {
        let node = person();
        let mut doc = TopLevelEntity::empty(json!([ACTIVITY_STREAMS_CONTEXT]));
        doc.set_entity(&node);
        assert_eq!(Entity::id(&doc), Some("http://ex.org/u/alice"));
        assert_eq!(Entity::discriminator(&doc), Some("Person"));
    }

    #[test]
    fn decoded_document_keeps_context() {
        let registry = vocabulary();
        let bytes = br#"{"@context": "https://www.w3.org/ns/activitystreams", "type": "Person", "id": "http://ex.org/u/alice"}"#;
        let doc = decode_document(bytes, &registry, &CodecOptions::default()).unwrap();
        assert_eq!(doc.context, Some(json!(ACTIVITY_STREAMS_CONTEXT)));
        assert_eq!(doc.entity, person());
    }
}
