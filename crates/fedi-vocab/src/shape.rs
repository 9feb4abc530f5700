//! Declarative shape model.
//!
//! A concrete variant is a linear chain of [`Fragment`]s, each listing the wire
//! fields it owns. Typed props structs implement [`Props`] to move their
//! fields in and out of a JSON map; the encode and decode engines fold over
//! the chain and never look at a field that the current fragment does not
//! declare.

use serde_json::{Map, Value};

use crate::error::{json_kind, CodecError};
use crate::wire::{DecodeCx, WireDecode, WireEncode};

/// Root family a concrete variant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Entity,
    Object,
    Link,
    Activity,
    Collection,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Object => "object",
            Self::Link => "link",
            Self::Activity => "activity",
            Self::Collection => "collection",
        }
    }
}

/// Whether a field must be present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Omitted on encode when the value is its default.
    Optional,
}

/// Wire kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    StrList,
    Int,
    Float,
    Bool,
    Timestamp,
    LangMap,
    /// Two-alternative leaf union.
    Union,
    /// Inline node or reference, decoded through the registry.
    Ref,
    RefList,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::StrList => "str[]",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Timestamp => "timestamp",
            Self::LangMap => "langmap",
            Self::Union => "union",
            Self::Ref => "ref",
            Self::RefList => "ref[]",
        }
    }

    /// Fields whose values are resolved through the type registry.
    pub fn is_polymorphic(self) -> bool {
        matches!(self, Self::Ref | Self::RefList)
    }

    pub fn is_list(self) -> bool {
        matches!(self, Self::StrList | Self::RefList)
    }

    /// Whether an encoded value has the JSON shape this kind produces.
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Self::Str | Self::Timestamp => value.is_string(),
            Self::Int => value.is_u64() || value.is_i64(),
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::LangMap => value
                .as_object()
                .is_some_and(|m| m.values().all(Value::is_string)),
            Self::StrList => value
                .as_array()
                .is_some_and(|a| a.iter().all(Value::is_string)),
            Self::Ref => value.is_string() || value.is_object(),
            Self::RefList => value
                .as_array()
                .is_some_and(|a| a.iter().all(|v| v.is_string() || v.is_object())),
            Self::Union => !value.is_null(),
        }
    }
}

/// One entry of a fragment's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub presence: Presence,
    pub kind: FieldKind,
}

impl Field {
    pub const fn optional(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            presence: Presence::Optional,
            kind,
        }
    }

    pub const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            presence: Presence::Required,
            kind,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// A named set of fields layered onto at most one parent fragment.
#[derive(Debug)]
pub struct Fragment {
    pub name: &'static str,
    pub parent: Option<&'static Fragment>,
    pub fields: &'static [Field],
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Fragment {}

impl Fragment {
    /// Field declared by this fragment (ancestors are not consulted).
    pub fn field(&self, key: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// The ancestry chain, ancestor first, ending with `self`.
    pub fn chain(&'static self) -> Vec<&'static Fragment> {
        let mut chain = Vec::new();
        let mut cursor = Some(self);
        while let Some(fragment) = cursor {
            chain.push(fragment);
            cursor = fragment.parent;
        }
        chain.reverse();
        chain
    }

    /// Whether `ancestor` appears in this fragment's chain (itself included).
    pub fn extends(&self, ancestor: &Fragment) -> bool {
        let mut cursor = Some(self);
        while let Some(fragment) = cursor {
            if fragment == ancestor {
                return true;
            }
            cursor = fragment.parent;
        }
        false
    }

    /// Fields visible on a variant ending in this fragment, ancestor first.
    /// A key redeclared by a more-derived fragment keeps the ancestor's
    /// declaration, matching [`FieldWriter::put`] where the first writer wins.
    pub fn resolved_fields(&'static self) -> Vec<(&'static Fragment, &'static Field)> {
        let mut result: Vec<(&'static Fragment, &'static Field)> = Vec::new();
        for fragment in self.chain() {
            for field in fragment.fields {
                if !result.iter().any(|(_, f)| f.key == field.key) {
                    result.push((fragment, field));
                }
            }
        }
        result
    }
}

// -------------------------------------------------------------------------
// Layers

/// Typed fields owned by exactly one fragment.
pub trait Props: Sized {
    fn fragment() -> &'static Fragment;

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError>;

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError>;
}

/// Object-safe view of a [`Props`] value, used to fold over a node's layers.
pub trait Layer {
    fn fragment(&self) -> &'static Fragment;

    fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError>;
}

impl<P: Props> Layer for P {
    fn fragment(&self) -> &'static Fragment {
        P::fragment()
    }

    fn write_fields(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        self.write(out)
    }
}

/// Read the layer `P` out of a shared map.
pub fn read_layer<P: Props>(
    map: &Map<String, Value>,
    cx: &mut DecodeCx<'_>,
) -> Result<P, CodecError> {
    P::read(&FieldReader::new(map, P::fragment()), cx)
}

// -------------------------------------------------------------------------
// FieldWriter

/// Writes one fragment's fields into the accumulating output map.
pub struct FieldWriter<'a> {
    out: &'a mut Map<String, Value>,
    fragment: &'static Fragment,
}

impl<'a> FieldWriter<'a> {
    pub fn new(out: &'a mut Map<String, Value>, fragment: &'static Fragment) -> Self {
        Self { out, fragment }
    }

    pub fn fragment(&self) -> &'static Fragment {
        self.fragment
    }

    /// Write `value` under `key`.
    ///
    /// Optional defaults and nulls are skipped, and a key that an earlier layer
    /// already wrote is left untouched.
    pub fn put<T: WireEncode + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CodecError> {
        let field = self.fragment.field(key).ok_or_else(|| {
            CodecError::UnsupportedShape(format!(
                "{} does not declare `{}`",
                self.fragment.name, key
            ))
        })?;
        if field.presence == Presence::Optional && value.is_default() {
            return Ok(());
        }
        if self.out.contains_key(field.key) {
            tracing::trace!(
                fragment = self.fragment.name,
                key = field.key,
                "key already written by an ancestor fragment"
            );
            return Ok(());
        }
        let encoded = value.encode_wire()?;
        if encoded.is_null() {
            return Ok(());
        }
        if !field.kind.admits(&encoded) {
            return Err(CodecError::UnsupportedShape(format!(
                "{}.{}: {} value for a {} field",
                self.fragment.name,
                field.key,
                json_kind(&encoded),
                field.kind.as_str()
            )));
        }
        self.out.insert(field.key.to_string(), encoded);
        Ok(())
    }
}

// -------------------------------------------------------------------------
// FieldReader

/// Reads one fragment's fields out of a shared map without consuming keys.
pub struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    fragment: &'static Fragment,
}

impl<'a> FieldReader<'a> {
    pub fn new(map: &'a Map<String, Value>, fragment: &'static Fragment) -> Self {
        Self { map, fragment }
    }

    pub fn fragment(&self) -> &'static Fragment {
        self.fragment
    }

    fn lookup(&self, key: &str) -> Result<(&'static Field, Option<&'a Value>), CodecError> {
        let field = self.fragment.field(key).ok_or_else(|| {
            CodecError::UnsupportedShape(format!(
                "{} does not declare `{}`",
                self.fragment.name, key
            ))
        })?;
        let value = self.map.get(field.key).filter(|v| !v.is_null());
        Ok((field, value))
    }

    /// Read an optional field; absent or null yields `T::default()`.
    pub fn optional<T: WireDecode + Default>(
        &self,
        key: &str,
        cx: &mut DecodeCx<'_>,
    ) -> Result<T, CodecError> {
        let (field, value) = self.lookup(key)?;
        if field.is_required() {
            return Err(CodecError::UnsupportedShape(format!(
                "{}.{} is required but read as optional",
                self.fragment.name, field.key
            )));
        }
        match value {
            None => Ok(T::default()),
            Some(value) => decode_field(field, value, cx),
        }
    }

    pub fn required<T: WireDecode>(&self, key: &str, cx: &mut DecodeCx<'_>) -> Result<T, CodecError> {
        let (field, value) = self.lookup(key)?;
        match value {
            None => Err(CodecError::MissingRequiredField {
                fragment: self.fragment.name,
                key: field.key,
            }),
            Some(value) => decode_field(field, value, cx),
        }
    }
}

fn decode_field<T: WireDecode>(
    field: &Field,
    value: &Value,
    cx: &mut DecodeCx<'_>,
) -> Result<T, CodecError> {
    // Any list-valued property may carry a single bare value.
    if field.kind.is_list() && !value.is_array() {
        let wrapped = Value::Array(vec![value.clone()]);
        return T::decode_wire(&wrapped, cx);
    }
    T::decode_wire(value, cx)
}
