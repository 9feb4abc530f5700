//! Encode engine: [`Node`] → wire bytes.
//!
//! A node is flattened by folding over its layers, ancestor first. Each layer
//! writes through a [`FieldWriter`] scoped to its own fragment, so a key an
//! ancestor already wrote is never overwritten by a descendant.

use serde_json::{Map, Value};

use crate::decode::{ID_KEY, TYPE_KEY};
use crate::error::CodecError;
use crate::shape::FieldWriter;
use crate::vocab::node::{ITEMS, ORDERED_ITEMS};
use crate::vocab::Node;
use crate::wire::WireEncode;

pub fn encode(node: &Node) -> Result<Vec<u8>, CodecError> {
    to_bytes(&to_value(node)?)
}

/// Encode into a wire tree instead of bytes.
pub fn to_value(node: &Node) -> Result<Value, CodecError> {
    to_map(node).map(Value::Object)
}

/// Flatten `node` into one map, discriminator first.
pub fn to_map(node: &Node) -> Result<Map<String, Value>, CodecError> {
    let (Some(leaf), Some(discriminator)) = (node.fragment(), node.discriminator()) else {
        let mut map = Map::new();
        if let Some(id) = node.id() {
            map.insert(ID_KEY.to_string(), Value::String(id.to_string()));
        }
        return Ok(map);
    };

    let chain = leaf.chain();
    let mut fields = Map::new();
    let mut cursor = 0;
    for layer in node.layers() {
        let fragment = layer.fragment();
        cursor = match chain[cursor..].iter().position(|f| *f == fragment) {
            Some(offset) => cursor + offset + 1,
            None => {
                return Err(CodecError::UnsupportedShape(format!(
                    "layer {} is not on the {} chain after position {}",
                    fragment.name, leaf.name, cursor
                )))
            }
        };
        layer.write_fields(&mut FieldWriter::new(&mut fields, fragment))?;
    }
    tracing::trace!(discriminator, keys = fields.len(), "flattened node");

    let mut map = Map::with_capacity(fields.len() + 1);
    map.insert(TYPE_KEY.to_string(), Value::String(discriminator.to_string()));
    let ordered = node.is_ordered();
    for (key, value) in fields {
        if ordered && key == ITEMS {
            map.insert(ORDERED_ITEMS.to_string(), value);
        } else {
            map.insert(key, value);
        }
    }
    Ok(map)
}

pub(crate) fn to_bytes(value: &Value) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::UnsupportedShape(e.to_string()))
}

impl WireEncode for Node {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::either::Either;
    use crate::vocab::*;
    use serde_json::json;

    fn note(content: &str) -> Node {
        Node::Object(
            ObjectType::Note,
            ObjectNode {
                entity: EntityProps::new("http://ex.org/n/1"),
                object: ObjectProps {
                    content: Some(content.to_string()),
                    ..Default::default()
                },
            },
        )
    }

    #[test]
    fn discriminator_comes_first() {
        let value = to_value(&note("hi")).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["type", "id", "content"]);
    }

    #[test]
    fn top_level_reference_is_id_map() {
        let value = to_value(&Node::reference("http://ex.org/1")).unwrap();
        assert_eq!(value, json!({"id": "http://ex.org/1"}));
    }

    #[test]
    fn iri_refs_encode_as_bare_strings() {
        let activity = Node::Activity(
            ActivityType::Like,
            ActivityNode {
                activity: ActivityProps {
                    object: vec![Either::left("http://ex.org/n/1".to_string())],
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let value = to_value(&activity).unwrap();
        assert_eq!(value, json!({"type": "Like", "object": ["http://ex.org/n/1"]}));
    }

    #[test]
    fn ordered_items_are_renamed() {
        let collection = Node::Collection(CollectionNode {
            collection: CollectionProps {
                items: vec![Either::left("a".to_string())],
                ..Default::default()
            },
            ordered: true,
            ..Default::default()
        });
        let value = to_value(&collection).unwrap();
        assert_eq!(value, json!({"type": "OrderedCollection", "orderedItems": ["a"]}));
    }

    #[test]
    fn empty_node_is_just_the_discriminator() {
        let value = to_value(&Node::Place(PlaceNode::default())).unwrap();
        assert_eq!(value, json!({"type": "Place"}));
    }
}
