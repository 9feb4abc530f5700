//! Registry and options bundled behind one handle.

use std::sync::Arc;

use crate::decode::decode_with;
use crate::document::{decode_document, DecodedDocument, TopLevelEntity};
use crate::encode::encode;
use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::registry::Registry;
use crate::vocab::{vocabulary, Node};

/// A cheaply cloneable codec.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<Registry>,
    options: CodecOptions,
}

impl Codec {
    pub fn new(registry: Arc<Registry>, options: CodecOptions) -> Self {
        Self { registry, options }
    }

    /// Codec over the full vocabulary with default options.
    pub fn vocabulary() -> Self {
        Self::new(Arc::new(vocabulary()), CodecOptions::default())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Node, CodecError> {
        decode_with(bytes, &self.registry, &self.options)
    }

    pub fn encode(&self, node: &Node) -> Result<Vec<u8>, CodecError> {
        encode(node)
    }

    /// Encode `node` as a standalone document under `context`.
    pub fn encode_document(
        &self,
        context: impl Into<serde_json::Value>,
        node: &Node,
    ) -> Result<Vec<u8>, CodecError> {
        TopLevelEntity::new(context, node).encode()
    }

    pub fn decode_document(&self, bytes: &[u8]) -> Result<DecodedDocument, CodecError> {
        decode_document(bytes, &self.registry, &self.options)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::vocabulary()
    }
}
