//! Protocol literals for runtime values.
//!
//! One writer per concrete value kind, selected by exact kind match. There
//! is no fallback: a value without a writer is an error, not a guess.

mod duration;
mod writers;


use remoteq_core::{TypeRef, Value};

use crate::{Error, Result};

pub use duration::iso8601_duration;

/// Concrete value kind a literal writer is registered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Null,
    Bool,
    Binary,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Decimal,
    F32,
    F64,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Guid,
    String,
    Enum,
    Stream,
}

impl LiteralKind {
    /// Kind of `value`, `None` for values that never have a literal form.
    pub fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Binary(_) => Self::Binary,
            Value::DateTime(_) => Self::DateTime,
            Value::DateTimeOffset(_) => Self::DateTimeOffset,
            Value::TimeSpan(_) => Self::TimeSpan,
            Value::Decimal(_) => Self::Decimal,
            Value::F32(_) => Self::F32,
            Value::F64(_) => Self::F64,
            Value::U8(_) => Self::U8,
            Value::I8(_) => Self::I8,
            Value::I16(_) => Self::I16,
            Value::U16(_) => Self::U16,
            Value::I32(_) => Self::I32,
            Value::U32(_) => Self::U32,
            Value::I64(_) => Self::I64,
            Value::U64(_) => Self::U64,
            Value::Guid(_) => Self::Guid,
            Value::String(_) => Self::String,
            Value::Enum { .. } => Self::Enum,
            Value::Stream(_) => Self::Stream,
            Value::Record(_) | Value::List(_) | Value::Source(_) => return None,
        })
    }
}

/// Writes a value as protocol literal text.
pub type LiteralWriteFn = fn(&Value) -> Result<String>;

/// Registry of literal writers keyed by exact value kind.
#[derive(Clone, Debug)]
pub struct LiteralWriters {
    writers: Vec<(LiteralKind, LiteralWriteFn)>,
}

impl Default for LiteralWriters {
    fn default() -> Self {
        use writers::*;

        let mut writers: Vec<(LiteralKind, LiteralWriteFn)> = vec![
            (LiteralKind::Null, write_null),
            (LiteralKind::Bool, write_bool),
            (LiteralKind::Binary, write_binary),
            (LiteralKind::DateTime, write_datetime),
            (LiteralKind::DateTimeOffset, write_datetime_offset),
            (LiteralKind::TimeSpan, write_time),
            (LiteralKind::Decimal, write_decimal),
            (LiteralKind::F32, write_single),
            (LiteralKind::F64, write_double),
            (LiteralKind::Guid, write_guid),
            (LiteralKind::String, write_string),
            (LiteralKind::Enum, write_enum),
            (LiteralKind::Stream, write_stream),
        ];
        for kind in [
            LiteralKind::U8,
            LiteralKind::I8,
            LiteralKind::I16,
            LiteralKind::U16,
            LiteralKind::I32,
            LiteralKind::U32,
            LiteralKind::I64,
            LiteralKind::U64,
        ] {
            writers.push((kind, write_integer));
        }

        Self { writers }
    }
}

impl LiteralWriters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with no writers at all.
    pub fn empty() -> Self {
        Self {
            writers: Vec::new(),
        }
    }

    /// Register `writer` for `kind`, replacing an existing one.
    pub fn with_writer(mut self, kind: LiteralKind, writer: LiteralWriteFn) -> Self {
        match self.writers.iter_mut().find(|(k, _)| *k == kind) {
            Some(slot) => slot.1 = writer,
            None => self.writers.push((kind, writer)),
        }
        self
    }

    pub fn contains(&self, kind: LiteralKind) -> bool {
        self.writers.iter().any(|(k, _)| *k == kind)
    }

    /// Write `value` whose static type is `static_type`.
    ///
    /// The static type only names the failure; the writer is chosen by the
    /// value's own kind.
    pub fn write(&self, value: &Value, static_type: &TypeRef) -> Result<String> {
        let unsupported = || {
            let ty = match static_type {
                TypeRef::Object => value.runtime_type(),
                other => other.clone(),
            };
            Error::UnsupportedLiteralType(ty)
        };

        let kind = LiteralKind::of(value).ok_or_else(unsupported)?;
        let (_, writer) = self
            .writers
            .iter()
            .find(|(k, _)| *k == kind)
            .ok_or_else(unsupported)?;
        writer(value)
    }
}
