//! Discriminator resolution, registry extension and error reporting.

use fedi_vocab::shape::{read_layer, FieldReader, FieldWriter, Props};
use fedi_vocab::vocab::fragments::LINK;
use fedi_vocab::vocab::*;
use fedi_vocab::wire::DecodeCx;
use fedi_vocab::{
    decode, encode, shared, vocabulary, CodecError, Field, FieldKind, Fragment, Node, Registry,
    RegistryBuilder,
};
use serde_json::{json, Map, Value};

fn bytes(value: Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

// ----------------------------------------------------------------- Vocabulary

#[test]
fn every_discriminator_is_idempotent() {
    let registry = vocabulary();
    for discriminator in registry.discriminators() {
        let node = decode(&bytes(json!({"type": discriminator})), &registry)
            .unwrap_or_else(|e| panic!("{discriminator}: {e}"));
        assert_eq!(node.discriminator(), Some(discriminator));
        let value: Value = serde_json::from_slice(&encode(&node).unwrap()).unwrap();
        assert_eq!(value["type"], json!(discriminator));
    }
}

#[test]
fn bogus_discriminator_is_rejected() {
    let err = decode(br#"{"type":"Bogus"}"#, shared()).unwrap_err();
    assert_eq!(err, CodecError::UnknownDiscriminator("Bogus".to_string()));
    assert_eq!(err.to_string(), "unknown discriminator: Bogus");
}

#[test]
fn nested_unknown_discriminator_surfaces_through_the_union() {
    let err = decode(
        &bytes(json!({"type": "Create", "object": {"type": "Bogus"}})),
        shared(),
    )
    .unwrap_err();
    let CodecError::AmbiguousUnion { left, right } = err else {
        panic!("expected both alternatives to fail, got {err:?}");
    };
    assert!(matches!(*left, CodecError::TypeMismatch { .. }));
    assert_eq!(*right, CodecError::UnknownDiscriminator("Bogus".to_string()));
}

#[test]
fn typed_document_without_type_is_missing_discriminator() {
    let err = decode(&bytes(json!({"content": "hi"})), shared()).unwrap_err();
    assert_eq!(err, CodecError::MissingDiscriminator);
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = Registry::builder().build();
    assert!(registry.is_empty());
    let err = decode(&bytes(json!({"type": "Note"})), &registry).unwrap_err();
    assert_eq!(err, CodecError::UnknownDiscriminator("Note".to_string()));
}

// ----------------------------------------------------------------- Extensions

static HASHTAG: Fragment = Fragment {
    name: "Hashtag",
    parent: Some(&LINK),
    fields: &[Field::required("name", FieldKind::Str)],
};

#[derive(Debug)]
struct HashtagProps {
    name: String,
}

impl Props for HashtagProps {
    fn fragment() -> &'static Fragment {
        &HASHTAG
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("name", &self.name)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            name: input.required("name", cx)?,
        })
    }
}

fn decode_hashtag(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Node, CodecError> {
    let tag: HashtagProps = read_layer(map, cx)?;
    let mut link = LinkNode::read(map, cx)?;
    link.link.name = Some(tag.name);
    Ok(Node::Link(LinkType::Link, link))
}

fn extended() -> Registry {
    let mut builder = RegistryBuilder::new();
    register_vocabulary(&mut builder);
    builder.register("Hashtag", decode_hashtag);
    builder.build()
}

#[test]
fn extension_registers_alongside_vocabulary() {
    let registry = extended();
    assert_eq!(registry.len(), vocabulary().len() + 1);
    let node = decode(
        &bytes(json!({"type": "Hashtag", "href": "http://ex.org/tags/rust", "name": "#rust"})),
        &registry,
    )
    .unwrap();
    let Node::Link(LinkType::Link, link) = node else {
        panic!("expected a link");
    };
    assert_eq!(link.link.name.as_deref(), Some("#rust"));
    assert_eq!(link.link.href.as_deref(), Some("http://ex.org/tags/rust"));
}

#[test]
fn extension_required_field_is_enforced() {
    let registry = extended();
    let err = decode(&bytes(json!({"type": "Hashtag"})), &registry).unwrap_err();
    assert_eq!(
        err,
        CodecError::MissingRequiredField {
            fragment: "Hashtag",
            key: "name"
        }
    );
}

#[test]
fn extensions_resolve_inside_vocabulary_fields() {
    let registry = extended();
    let node = decode(
        &bytes(json!({
            "type": "Note",
            "tag": [{"type": "Hashtag", "name": "#rust"}, {"type": "Mention", "href": "http://ex.org/u/bob"}]
        })),
        &registry,
    )
    .unwrap();
    let tags = &node.object().unwrap().tag;
    assert_eq!(tags.len(), 2);
    assert!(tags
        .iter()
        .all(|t| matches!(t.as_right().map(|n| n.family()), Some(fedi_vocab::Family::Link))));
}

#[test]
fn replacing_a_vocabulary_entry() {
    let mut builder = RegistryBuilder::new();
    register_vocabulary(&mut builder);
    builder.register("Note", |map: &Map<String, Value>, cx: &mut DecodeCx<'_>| {
        Ok(Node::Object(ObjectType::Article, ObjectNode::read(map, cx)?))
    });
    let registry = builder.build();
    let node = decode(&bytes(json!({"type": "Note"})), &registry).unwrap();
    assert_eq!(node.discriminator(), Some("Article"));
}
