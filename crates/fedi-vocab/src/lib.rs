//! ActivityStreams vocabulary codec.
//!
//! # Overview
//!
//! Every document is one of a closed set of record shapes built by layering
//! field fragments (`Entity` → `Object` → `Activity` → `Accept` → …). Decoding
//! reads the `type` discriminator, resolves it through a [`Registry`] and lets
//! each fragment of the selected variant read its own keys from the shared
//! map. Encoding flattens the layers back into a single map.
//!
//! # Example
//!
//! ```
//! use fedi_vocab::{decode, encode, vocabulary, Node, ObjectType};
//! use serde_json::json;
//!
//! let registry = vocabulary();
//! let node = decode(br#"{"type": "Note", "id": "http://ex.org/n/1", "content": "hi"}"#, &registry).unwrap();
//! assert!(matches!(node, Node::Object(ObjectType::Note, _)));
//!
//! let bytes = encode(&node).unwrap();
//! let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
//! assert_eq!(value, json!({"type": "Note", "id": "http://ex.org/n/1", "content": "hi"}));
//! ```

pub mod codec;
pub mod decode;
pub mod document;
pub mod either;
pub mod encode;
pub mod error;
pub mod options;
pub mod registry;
pub mod shape;
pub mod vocab;
pub mod wire;

pub use codec::Codec;
pub use decode::{decode, decode_with, from_value};
pub use document::{decode_document, DecodedDocument, TopLevelEntity, ACTIVITY_STREAMS_CONTEXT};
pub use either::Either;
pub use encode::{encode, to_value};
pub use error::CodecError;
pub use options::{CodecOptions, DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH};
pub use registry::{DecodeFn, RefineFn, Registry, RegistryBuilder};
pub use shape::{Family, Field, FieldKind, Fragment, Presence};
pub use vocab::{shared, vocabulary, Entity, Node, ObjectType, Ref};
