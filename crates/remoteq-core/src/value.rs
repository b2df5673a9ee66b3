//! Runtime values held by constants and produced by evaluation.

use std::fmt;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use indexmap::IndexMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TypeRef;

/// Scalar or composite runtime value.
///
/// `Record` preserves field order; it models captured variables and helper
/// objects whose fields expressions may read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    U8(u8),
    I8(i8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    String(String),
    Guid(Uuid),
    /// Date and time, interpreted as UTC.
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    TimeSpan(#[serde(with = "time_delta_nanos")] TimeDelta),
    Binary(Vec<u8>),
    #[serde(skip)]
    Stream(SharedStream),
    Enum {
        type_name: String,
        member: String,
    },
    Record(IndexMap<String, Value>),
    List(Vec<Value>),
    /// Root marker of an operator chain, naming the collection.
    Source(String),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn enum_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Runtime type of the value. `Null`, records and sources report `Object`.
    pub fn runtime_type(&self) -> TypeRef {
        match self {
            Self::Null | Self::Record(_) | Self::Source(_) => TypeRef::Object,
            Self::Bool(_) => TypeRef::Bool,
            Self::U8(_) => TypeRef::U8,
            Self::I8(_) => TypeRef::I8,
            Self::I16(_) => TypeRef::I16,
            Self::U16(_) => TypeRef::U16,
            Self::I32(_) => TypeRef::I32,
            Self::U32(_) => TypeRef::U32,
            Self::I64(_) => TypeRef::I64,
            Self::U64(_) => TypeRef::U64,
            Self::F32(_) => TypeRef::F32,
            Self::F64(_) => TypeRef::F64,
            Self::Decimal(_) => TypeRef::Decimal,
            Self::String(_) => TypeRef::String,
            Self::Guid(_) => TypeRef::Guid,
            Self::DateTime(_) => TypeRef::DateTime,
            Self::DateTimeOffset(_) => TypeRef::DateTimeOffset,
            Self::TimeSpan(_) => TypeRef::TimeSpan,
            Self::Binary(_) => TypeRef::Binary,
            Self::Stream(_) => TypeRef::Stream,
            Self::Enum { type_name, .. } => TypeRef::Enum(type_name.clone()),
            Self::List(_) => TypeRef::sequence_of(TypeRef::Object),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Widen any integer kind to `i128`.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

// ============================================================================
// Streams
// ============================================================================

/// A readable byte source used as a binary literal.
///
/// `seek_to_start` returns `Ok(true)` when the stream was repositioned to its
/// start, `Ok(false)` when it cannot seek.
pub trait BinaryStream: Read + Send {
    fn seek_to_start(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

impl<T: AsRef<[u8]> + Send> BinaryStream for Cursor<T> {
    fn seek_to_start(&mut self) -> io::Result<bool> {
        self.seek(SeekFrom::Start(0))?;
        Ok(true)
    }
}

impl BinaryStream for std::fs::File {
    fn seek_to_start(&mut self) -> io::Result<bool> {
        self.seek(SeekFrom::Start(0))?;
        Ok(true)
    }
}

/// Forward-only wrapper for readers that cannot seek.
pub struct ForwardOnly<R>(pub R);

impl<R: Read> Read for ForwardOnly<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Send> BinaryStream for ForwardOnly<R> {}

/// Shared handle to a binary stream. Reading consumes the stream.
///
/// Two handles are equal when they point at the same stream.
#[derive(Clone)]
pub struct SharedStream(Arc<Mutex<Box<dyn BinaryStream>>>);

impl SharedStream {
    pub fn new(stream: impl BinaryStream + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(stream))))
    }

    /// Rewind when possible, then read everything that remains.
    pub fn read_to_end(&self) -> io::Result<Vec<u8>> {
        let mut stream = self.0.lock();
        stream.seek_to_start()?;
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl PartialEq for SharedStream {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedStream(..)")
    }
}

mod time_delta_nanos {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, ser};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = value
            .num_nanoseconds()
            .ok_or_else(|| ser::Error::custom("time span out of range"))?;
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::nanoseconds)
    }
}
