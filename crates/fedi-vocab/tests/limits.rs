//! Nesting bounds, document wrapping and shared use of one codec.

use std::sync::Arc;
use std::thread;

use fedi_vocab::{
    shared, vocabulary, Codec, CodecError, CodecOptions, Entity, Node, TopLevelEntity,
    ACTIVITY_STREAMS_CONTEXT, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH,
};
use serde_json::{json, Value};

/// `depth` notes, each the `context` of the one above it.
fn nested_notes(depth: usize) -> Vec<u8> {
    let mut value = json!({"type": "Note", "id": "leaf"});
    for _ in 1..depth {
        value = json!({"type": "Note", "context": value});
    }
    serde_json::to_vec(&value).unwrap()
}

/// `depth` notes, each the only `tag` of the one above it. Every level adds
/// both an object and an array to the JSON nesting.
fn tagged_notes(depth: usize) -> Vec<u8> {
    let mut value = json!({"type": "Note", "id": "leaf"});
    for _ in 1..depth {
        value = json!({"type": "Note", "tag": [value]});
    }
    serde_json::to_vec(&value).unwrap()
}

// ----------------------------------------------------------------- Depth

#[test]
fn default_depth_accepts_up_to_the_limit() {
    let codec = Codec::vocabulary();
    assert!(codec.decode(&nested_notes(DEFAULT_MAX_DEPTH)).is_ok());
}

#[test]
fn deeply_nested_input_is_rejected() {
    let codec = Codec::vocabulary();
    let err = codec.decode(&nested_notes(80)).unwrap_err();
    assert_eq!(err, CodecError::DepthLimitExceeded(DEFAULT_MAX_DEPTH));
}

#[test]
fn depth_limit_is_configurable() {
    let codec = Codec::new(Arc::new(vocabulary()), CodecOptions::new().with_max_depth(10));
    assert!(codec.decode(&nested_notes(10)).is_ok());
    assert_eq!(
        codec.decode(&nested_notes(11)),
        Err(CodecError::DepthLimitExceeded(10))
    );
    let strict = Codec::new(Arc::new(vocabulary()), CodecOptions::new().with_max_depth(3));
    assert_eq!(
        strict.decode(&nested_notes(4)),
        Err(CodecError::DepthLimitExceeded(3))
    );
}

#[test]
fn nesting_through_list_fields_reaches_the_limit() {
    let codec = Codec::vocabulary();
    assert!(codec.decode(&tagged_notes(DEFAULT_MAX_DEPTH)).is_ok());
    assert_eq!(
        codec.decode(&tagged_notes(DEFAULT_MAX_DEPTH + 1)),
        Err(CodecError::DepthLimitExceeded(DEFAULT_MAX_DEPTH))
    );
    assert_eq!(
        codec.decode_document(&tagged_notes(100)),
        Err(CodecError::DepthLimitExceeded(DEFAULT_MAX_DEPTH))
    );
}

#[test]
fn configured_depth_is_clamped_to_what_the_parser_accepts() {
    let codec = Codec::new(Arc::new(vocabulary()), CodecOptions::new().with_max_depth(200));
    assert_eq!(codec.options().max_depth, MAX_SUPPORTED_DEPTH);
    assert_eq!(
        codec.decode(&nested_notes(150)),
        Err(CodecError::DepthLimitExceeded(MAX_SUPPORTED_DEPTH))
    );
    assert!(codec.decode(&tagged_notes(MAX_SUPPORTED_DEPTH)).is_ok());

    // Set directly, the field is still bounded when decoding.
    let unclamped = Codec::new(Arc::new(vocabulary()), CodecOptions { max_depth: 200 });
    assert_eq!(
        unclamped.decode(&nested_notes(150)),
        Err(CodecError::DepthLimitExceeded(MAX_SUPPORTED_DEPTH))
    );
}

#[test]
fn depth_counts_list_items_once_per_level() {
    let codec = Codec::new(Arc::new(vocabulary()), CodecOptions::new().with_max_depth(2));
    let wide = json!({
        "type": "Collection",
        "items": [{"type": "Note"}, {"type": "Note"}, {"type": "Note"}]
    });
    assert!(codec.decode(&serde_json::to_vec(&wide).unwrap()).is_ok());
}

// ----------------------------------------------------------------- Documents

#[test]
fn empty_document_is_no_entity_set() {
    let codec = Codec::vocabulary();
    let doc = TopLevelEntity::empty(ACTIVITY_STREAMS_CONTEXT);
    assert_eq!(doc.encode(), Err(CodecError::NoEntitySet));
    assert!(doc.entity().is_none());
    assert_eq!(doc.id(), None);
    // A document wrapping a value encodes through the codec as well.
    let node = Node::reference("http://ex.org/1");
    let bytes = codec.encode_document(ACTIVITY_STREAMS_CONTEXT, &node).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        value,
        json!({"@context": ACTIVITY_STREAMS_CONTEXT, "id": "http://ex.org/1"})
    );
}

#[test]
fn document_context_may_be_an_array() {
    let codec = Codec::vocabulary();
    let context = json!([ACTIVITY_STREAMS_CONTEXT, {"toot": "http://joinmastodon.org/ns#"}]);
    let bytes = serde_json::to_vec(&json!({
        "@context": context,
        "type": "Person",
        "id": "http://ex.org/u/alice"
    }))
    .unwrap();
    let doc = codec.decode_document(&bytes).unwrap();
    assert_eq!(doc.context, Some(context.clone()));
    assert_eq!(doc.entity.discriminator(), Some("Person"));

    let wrapped = TopLevelEntity::new(context.clone(), &doc.entity);
    assert_eq!(wrapped.context(), &context);
    assert_eq!(wrapped.discriminator(), Some("Person"));
    assert_eq!(wrapped.id(), Some("http://ex.org/u/alice"));
}

#[test]
fn document_without_context_decodes() {
    let codec = Codec::vocabulary();
    let doc = codec
        .decode_document(br#"{"type": "Note", "id": "n"}"#)
        .unwrap();
    assert_eq!(doc.context, None);
    assert_eq!(doc.entity.id(), Some("n"));
}

// ----------------------------------------------------------------- Sharing

#[test]
fn one_registry_serves_many_threads() {
    let codec = Codec::vocabulary();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let codec = codec.clone();
            thread::spawn(move || {
                let input = format!(r#"{{"type": "Note", "id": "http://ex.org/n/{i}"}}"#);
                let node = codec.decode(input.as_bytes()).unwrap();
                let again = codec.decode(&codec.encode(&node).unwrap()).unwrap();
                assert_eq!(node, again);
                node.id().map(str::to_string)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(format!("http://ex.org/n/{i}")));
    }
}

#[test]
fn shared_registry_matches_a_fresh_one() {
    assert_eq!(shared().discriminators(), vocabulary().discriminators());
}
