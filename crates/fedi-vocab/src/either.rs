//! Exclusive two-alternative union.
//!
//! `Either` carries no wrapper on the wire: a `Left(a)` encodes exactly like
//! `a`, a `Right(b)` exactly like `b`. Decoding tries `A` first, so `A` is the
//! preferred reading of any input both alternatives accept.

use serde_json::Value;

use crate::decode::parse;
use crate::error::CodecError;
use crate::options::CodecOptions;
use crate::registry::Registry;
use crate::wire::{DecodeCx, WireDecode, WireEncode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

impl<A, B> Either<A, B> {
    pub fn left(a: A) -> Self {
        Either::Left(a)
    }

    pub fn right(b: B) -> Self {
        Either::Right(b)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    pub fn as_left(&self) -> Option<&A> {
        match self {
            Either::Left(a) => Some(a),
            Either::Right(_) => None,
        }
    }

    pub fn as_right(&self) -> Option<&B> {
        match self {
            Either::Left(_) => None,
            Either::Right(b) => Some(b),
        }
    }

    pub fn into_left(self) -> Option<A> {
        match self {
            Either::Left(a) => Some(a),
            Either::Right(_) => None,
        }
    }

    pub fn into_right(self) -> Option<B> {
        match self {
            Either::Left(_) => None,
            Either::Right(b) => Some(b),
        }
    }

    pub fn map_left<C>(self, f: impl FnOnce(A) -> C) -> Either<C, B> {
        match self {
            Either::Left(a) => Either::Left(f(a)),
            Either::Right(b) => Either::Right(b),
        }
    }

    pub fn map_right<C>(self, f: impl FnOnce(B) -> C) -> Either<A, C> {
        match self {
            Either::Left(a) => Either::Left(a),
            Either::Right(b) => Either::Right(f(b)),
        }
    }
}

impl<A: WireEncode, B: WireEncode> Either<A, B> {
    /// Encode whichever payload is active.
    pub fn encode(&self) -> Result<Value, CodecError> {
        self.encode_wire()
    }
}

impl<A: WireDecode, B: WireDecode> Either<A, B> {
    /// Decode a buffer, trying `A` before `B`.
    pub fn decode(bytes: &[u8], registry: &Registry) -> Result<Self, CodecError> {
        Self::decode_with(bytes, registry, &CodecOptions::default())
    }

    pub fn decode_with(
        bytes: &[u8],
        registry: &Registry,
        options: &CodecOptions,
    ) -> Result<Self, CodecError> {
        let value = parse(bytes, options)?;
        let mut cx = DecodeCx::new(registry, options);
        Self::decode_wire(&value, &mut cx)
    }
}

impl<A: WireEncode, B: WireEncode> WireEncode for Either<A, B> {
    fn encode_wire(&self) -> Result<Value, CodecError> {
        match self {
            Either::Left(a) => a.encode_wire(),
            Either::Right(b) => b.encode_wire(),
        }
    }
}

impl<A: WireDecode, B: WireDecode> WireDecode for Either<A, B> {
    fn decode_wire(value: &Value, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        let left = match A::decode_wire(value, cx) {
            Ok(a) => return Ok(Either::Left(a)),
            Err(e @ CodecError::DepthLimitExceeded(_)) => return Err(e),
            Err(e) => e,
        };
        match B::decode_wire(value, cx) {
            Ok(b) => Ok(Either::Right(b)),
            Err(e @ CodecError::DepthLimitExceeded(_)) => Err(e),
            Err(right) => Err(CodecError::AmbiguousUnion {
                left: Box::new(left),
                right: Box::new(right),
            }),
        }
    }
}
