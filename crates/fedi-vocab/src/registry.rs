//! Discriminator → decode function table.
//!
//! Entries are collected on a [`RegistryBuilder`] and frozen into an immutable
//! [`Registry`]; nothing can be registered once decoding starts, so a built
//! registry is safe to share between any number of threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::vocab::Node;
use crate::wire::DecodeCx;

/// Builds a concrete variant from a map that carries its discriminator.
pub type DecodeFn =
    Arc<dyn Fn(&Map<String, Value>, &mut DecodeCx<'_>) -> Result<Node, CodecError> + Send + Sync>;

/// Inspects sibling keys and names the sub-variant to decode, if any.
pub type RefineFn = fn(&Map<String, Value>) -> Option<&'static str>;

#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, DecodeFn>,
    sub_variants: HashMap<String, DecodeFn>,
    refinements: HashMap<String, RefineFn>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the decoder for a wire discriminator. A later registration for
    /// the same discriminator replaces the earlier one.
    pub fn register<F>(&mut self, discriminator: impl Into<String>, decode: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>, &mut DecodeCx<'_>) -> Result<Node, CodecError>
            + Send
            + Sync
            + 'static,
    {
        let discriminator = discriminator.into();
        if self.entries.contains_key(&discriminator) {
            tracing::debug!(%discriminator, "replacing registered decoder");
        }
        self.entries.insert(discriminator, Arc::new(decode));
        self
    }

    /// Register a decoder reachable only through a refinement, never directly
    /// from a wire discriminator.
    pub fn register_sub_variant<F>(&mut self, key: impl Into<String>, decode: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>, &mut DecodeCx<'_>) -> Result<Node, CodecError>
            + Send
            + Sync
            + 'static,
    {
        self.sub_variants.insert(key.into(), Arc::new(decode));
        self
    }

    /// Attach a structural refinement to a discriminator. When `refine` names a
    /// sub-variant, that sub-variant's decoder runs instead of the plain entry.
    pub fn refine(&mut self, discriminator: impl Into<String>, refine: RefineFn) -> &mut Self {
        self.refinements.insert(discriminator.into(), refine);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
            sub_variants: self.sub_variants,
            refinements: self.refinements,
        }
    }
}

/// Read-only discriminator table.
pub struct Registry {
    entries: HashMap<String, DecodeFn>,
    sub_variants: HashMap<String, DecodeFn>,
    refinements: HashMap<String, RefineFn>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("discriminators", &self.discriminators())
            .field("sub_variants", &self.sub_variants.len())
            .field("refinements", &self.refinements.len())
            .finish()
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn resolve(&self, discriminator: &str) -> Option<&DecodeFn> {
        self.entries.get(discriminator)
    }

    pub fn contains(&self, discriminator: &str) -> bool {
        self.entries.contains_key(discriminator)
    }

    /// Resolve the decoder for `discriminator`, applying any refinement
    /// registered for it against `map`.
    pub fn resolve_for(
        &self,
        discriminator: &str,
        map: &Map<String, Value>,
    ) -> Result<&DecodeFn, CodecError> {
        if let Some(refine) = self.refinements.get(discriminator) {
            if let Some(key) = refine(map) {
                tracing::trace!(discriminator, sub_variant = key, "refined discriminator");
                return self.sub_variants.get(key).ok_or_else(|| {
                    CodecError::UnsupportedShape(format!(
                        "`{discriminator}` refined to unregistered sub-variant `{key}`"
                    ))
                });
            }
        }
        self.resolve(discriminator).ok_or_else(|| {
            tracing::debug!(discriminator, "unknown discriminator");
            CodecError::UnknownDiscriminator(discriminator.to_string())
        })
    }

    /// Registered wire discriminators, sorted.
    pub fn discriminators(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
