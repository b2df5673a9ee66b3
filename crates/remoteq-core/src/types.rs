//! Static type references carried by every expression node.
//!
//! Types are structural values: two `TypeRef`s are the same type when they
//! compare equal. Named types (`Entity`, `Enum`, `Class`) are resolved
//! against a [`Schema`](crate::Schema) when member information is needed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Static type of an expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Void,
    Object,
    Bool,
    U8,
    I8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    String,
    Guid,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    /// Byte sequence.
    Binary,
    /// Readable binary stream.
    Stream,
    /// Enumeration, by fully-qualified name.
    Enum(String),
    /// Record type registered in the schema.
    Entity(String),
    /// Owner of static methods (`Math`, `Enumerable`, `Queryable`, ...).
    Class(String),
    /// In-memory sequence of `T`.
    Sequence(Box<TypeRef>),
    /// Query over a remote collection of `T`.
    Queryable(Box<TypeRef>),
    /// `T?`
    Nullable(Box<TypeRef>),
    /// Delegate type of a lambda: parameter types and return type.
    Function(Vec<TypeRef>, Box<TypeRef>),
}

pub const MATH_CLASS: &str = "Math";
pub const ENUMERABLE_CLASS: &str = "Enumerable";
pub const QUERYABLE_CLASS: &str = "Queryable";

impl TypeRef {
    pub fn entity(name: impl Into<String>) -> Self {
        Self::Entity(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn math() -> Self {
        Self::class(MATH_CLASS)
    }

    pub fn enumerable() -> Self {
        Self::class(ENUMERABLE_CLASS)
    }

    pub fn queryable_class() -> Self {
        Self::class(QUERYABLE_CLASS)
    }

    pub fn sequence_of(element: TypeRef) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn queryable_of(element: TypeRef) -> Self {
        Self::Queryable(Box::new(element))
    }

    pub fn nullable_of(inner: TypeRef) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn function(params: Vec<TypeRef>, ret: TypeRef) -> Self {
        Self::Function(params, Box::new(ret))
    }

    /// Element type of a sequence or query, `None` for anything else.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Sequence(inner) | Self::Queryable(inner) => Some(inner),
            Self::Nullable(inner) => inner.element_type(),
            _ => None,
        }
    }

    /// Strips one level of `Nullable`.
    pub fn non_nullable(&self) -> &TypeRef {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    pub fn is_queryable(&self) -> bool {
        matches!(self, Self::Queryable(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.non_nullable(), Self::String)
    }

    pub fn is_class(&self, name: &str) -> bool {
        matches!(self, Self::Class(n) if n == name)
    }

    /// Whether `needle` occurs anywhere inside this type (including itself).
    pub fn mentions(&self, needle: &TypeRef) -> bool {
        if self == needle {
            return true;
        }
        match self {
            Self::Sequence(inner) | Self::Queryable(inner) | Self::Nullable(inner) => {
                inner.mentions(needle)
            }
            Self::Function(params, ret) => {
                params.iter().any(|p| p.mentions(needle)) || ret.mentions(needle)
            }
            _ => false,
        }
    }

    /// Replace every occurrence of `from` by `to`, including nested positions.
    pub fn substitute(&self, from: &TypeRef, to: &TypeRef) -> TypeRef {
        if self == from {
            return to.clone();
        }
        match self {
            Self::Sequence(inner) => Self::Sequence(Box::new(inner.substitute(from, to))),
            Self::Queryable(inner) => Self::Queryable(Box::new(inner.substitute(from, to))),
            Self::Nullable(inner) => Self::Nullable(Box::new(inner.substitute(from, to))),
            Self::Function(params, ret) => Self::Function(
                params.iter().map(|p| p.substitute(from, to)).collect(),
                Box::new(ret.substitute(from, to)),
            ),
            other => other.clone(),
        }
    }

    /// Name used for named types; the display form otherwise.
    pub fn name(&self) -> String {
        match self {
            Self::Enum(n) | Self::Entity(n) | Self::Class(n) => n.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Object => f.write_str("object"),
            Self::Bool => f.write_str("bool"),
            Self::U8 => f.write_str("u8"),
            Self::I8 => f.write_str("i8"),
            Self::I16 => f.write_str("i16"),
            Self::U16 => f.write_str("u16"),
            Self::I32 => f.write_str("i32"),
            Self::U32 => f.write_str("u32"),
            Self::I64 => f.write_str("i64"),
            Self::U64 => f.write_str("u64"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::Decimal => f.write_str("decimal"),
            Self::String => f.write_str("string"),
            Self::Guid => f.write_str("guid"),
            Self::DateTime => f.write_str("datetime"),
            Self::DateTimeOffset => f.write_str("datetimeoffset"),
            Self::TimeSpan => f.write_str("timespan"),
            Self::Binary => f.write_str("binary"),
            Self::Stream => f.write_str("stream"),
            Self::Enum(n) | Self::Entity(n) | Self::Class(n) => f.write_str(n),
            Self::Sequence(inner) => write!(f, "seq<{inner}>"),
            Self::Queryable(inner) => write!(f, "query<{inner}>"),
            Self::Nullable(inner) => write!(f, "{inner}?"),
            Self::Function(params, ret) => {
                f.write_str("fn(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}
