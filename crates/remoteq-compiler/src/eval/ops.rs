//! Operators over runtime values.
//!
//! Numeric operands are promoted pairwise: two integers stay integral, a
//! decimal on either side makes both decimal, otherwise both become `f64`.
//! Integral and decimal results are narrowed back to the node's static type.

use std::cmp::Ordering;

use remoteq_core::{BinaryOp, TypeRef, Value};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::{Error, Result};

#[derive(Clone, Copy, Debug)]
enum Num {
    Int(i128),
    Float(f64),
    Dec(Decimal),
}

impl Num {
    fn of(value: &Value) -> Option<Self> {
        if let Some(i) = value.as_integer() {
            return Some(Self::Int(i));
        }
        match *value {
            Value::F32(f) => Some(Self::Float(f.into())),
            Value::F64(f) => Some(Self::Float(f)),
            Value::Decimal(d) => Some(Self::Dec(d)),
            _ => None,
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
            Self::Dec(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    fn to_decimal(self) -> Result<Decimal> {
        match self {
            Self::Int(i) => Decimal::from_i128(i).ok_or_else(overflow),
            Self::Float(f) => Decimal::from_f64(f).ok_or_else(overflow),
            Self::Dec(d) => Ok(d),
        }
    }

    fn to_i128(self) -> Result<i128> {
        match self {
            Self::Int(i) => Ok(i),
            Self::Float(f) if f.is_finite() => Ok(f.trunc() as i128),
            Self::Float(_) => Err(overflow()),
            Self::Dec(d) => d.trunc().to_i128().ok_or_else(overflow),
        }
    }
}

enum Pair {
    Int(i128, i128),
    Float(f64, f64),
    Dec(Decimal, Decimal),
}

fn promote(a: Num, b: Num) -> Result<Pair> {
    Ok(match (a, b) {
        (Num::Int(x), Num::Int(y)) => Pair::Int(x, y),
        (Num::Dec(_), _) | (_, Num::Dec(_)) => Pair::Dec(a.to_decimal()?, b.to_decimal()?),
        _ => Pair::Float(a.to_f64(), b.to_f64()),
    })
}

fn overflow() -> Error {
    Error::InvalidArgument("arithmetic overflow".to_string())
}

fn mismatch(op: &str, value: &Value) -> Error {
    Error::InvalidArgument(format!(
        "operator `{op}` does not apply to `{}`",
        value.runtime_type()
    ))
}

pub(super) fn truth(value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| mismatch("bool", value))
}

pub(super) fn not(value: Value) -> Result<Value> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        Value::Null => Ok(Value::Null),
        other => Err(mismatch("not", &other)),
    }
}

pub(super) fn negate(value: Value) -> Result<Value> {
    let negated = match value {
        Value::Null => Some(Value::Null),
        Value::I8(v) => v.checked_neg().map(Value::I8),
        Value::I16(v) => v.checked_neg().map(Value::I16),
        Value::I32(v) => v.checked_neg().map(Value::I32),
        Value::I64(v) => v.checked_neg().map(Value::I64),
        Value::F32(v) => Some(Value::F32(-v)),
        Value::F64(v) => Some(Value::F64(-v)),
        Value::Decimal(v) => Some(Value::Decimal(-v)),
        other => return Err(mismatch("-", &other)),
    };
    negated.ok_or_else(overflow)
}

/// Numeric conversion to `ty`; other values pass through unchanged.
pub(super) fn convert(value: Value, ty: &TypeRef) -> Result<Value> {
    let Some(num) = Num::of(&value) else {
        return Ok(value);
    };
    match ty.non_nullable() {
        TypeRef::F64 => Ok(Value::F64(num.to_f64())),
        TypeRef::F32 => Ok(Value::F32(num.to_f64() as f32)),
        TypeRef::Decimal => num.to_decimal().map(Value::Decimal),
        target @ (TypeRef::U8
        | TypeRef::I8
        | TypeRef::I16
        | TypeRef::U16
        | TypeRef::I32
        | TypeRef::U32
        | TypeRef::I64
        | TypeRef::U64) => integer(num.to_i128()?, target),
        _ => Ok(value),
    }
}

/// Narrow `v` to the integer kind named by `ty` (`i64` for anything else).
fn integer(v: i128, ty: &TypeRef) -> Result<Value> {
    let narrowed = match ty.non_nullable() {
        TypeRef::U8 => u8::try_from(v).map(Value::U8),
        TypeRef::I8 => i8::try_from(v).map(Value::I8),
        TypeRef::I16 => i16::try_from(v).map(Value::I16),
        TypeRef::U16 => u16::try_from(v).map(Value::U16),
        TypeRef::I32 => i32::try_from(v).map(Value::I32),
        TypeRef::U32 => u32::try_from(v).map(Value::U32),
        TypeRef::U64 => u64::try_from(v).map(Value::U64),
        _ => i64::try_from(v).map(Value::I64),
    };
    narrowed.map_err(|_| overflow())
}

/// Equality with numeric promotion.
pub(crate) fn values_equal(left: &Value, right: &Value) -> Result<bool> {
    match (Num::of(left), Num::of(right)) {
        (Some(a), Some(b)) => Ok(match promote(a, b)? {
            Pair::Int(x, y) => x == y,
            Pair::Float(x, y) => x == y,
            Pair::Dec(x, y) => x == y,
        }),
        _ => Ok(left == right),
    }
}

/// `None` when the operands are unordered (NaN).
fn compare(left: &Value, right: &Value) -> Result<Option<Ordering>> {
    if let (Some(a), Some(b)) = (Num::of(left), Num::of(right)) {
        return Ok(match promote(a, b)? {
            Pair::Int(x, y) => Some(x.cmp(&y)),
            Pair::Float(x, y) => x.partial_cmp(&y),
            Pair::Dec(x, y) => Some(x.cmp(&y)),
        });
    }
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
        (Value::DateTimeOffset(a), Value::DateTimeOffset(b)) => a.cmp(b),
        (Value::TimeSpan(a), Value::TimeSpan(b)) => a.cmp(b),
        (Value::Guid(a), Value::Guid(b)) => a.cmp(b),
        _ => {
            return Err(Error::InvalidArgument(format!(
                "cannot compare `{}` with `{}`",
                left.runtime_type(),
                right.runtime_type()
            )));
        }
    };
    Ok(Some(ordering))
}

/// Apply a non-short-circuiting binary operator.
///
/// A null operand makes comparisons false and arithmetic null; two nulls
/// are equal.
pub(super) fn binary(op: BinaryOp, left: Value, right: Value, ty: &TypeRef) -> Result<Value> {
    if left.is_null() || right.is_null() {
        let both = left.is_null() && right.is_null();
        return Ok(match op {
            BinaryOp::Equal => Value::Bool(both),
            BinaryOp::NotEqual => Value::Bool(!both),
            op if op.is_predicate() => Value::Bool(false),
            _ => Value::Null,
        });
    }

    let ordered = |test: fn(Ordering) -> bool| -> Result<Value> {
        Ok(Value::Bool(compare(&left, &right)?.is_some_and(test)))
    };

    match op {
        BinaryOp::Equal => values_equal(&left, &right).map(Value::Bool),
        BinaryOp::NotEqual => values_equal(&left, &right).map(|eq| Value::Bool(!eq)),
        BinaryOp::GreaterThan => ordered(Ordering::is_gt),
        BinaryOp::GreaterThanOrEqual => ordered(Ordering::is_ge),
        BinaryOp::LessThan => ordered(Ordering::is_lt),
        BinaryOp::LessThanOrEqual => ordered(Ordering::is_le),
        BinaryOp::AndAlso => Ok(Value::Bool(truth(&left)? && truth(&right)?)),
        BinaryOp::OrElse => Ok(Value::Bool(truth(&left)? || truth(&right)?)),
        BinaryOp::Add => match (&left, &right) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            _ => arithmetic(op, &left, &right, ty),
        },
        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
            arithmetic(op, &left, &right, ty)
        }
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value, ty: &TypeRef) -> Result<Value> {
    let symbol = match op {
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        _ => "%",
    };
    let a = Num::of(left).ok_or_else(|| mismatch(symbol, left))?;
    let b = Num::of(right).ok_or_else(|| mismatch(symbol, right))?;

    match promote(a, b)? {
        Pair::Int(x, y) => {
            if y == 0 && matches!(op, BinaryOp::Divide | BinaryOp::Modulo) {
                return Err(Error::InvalidArgument("division by zero".to_string()));
            }
            let v = match op {
                BinaryOp::Add => x.checked_add(y),
                BinaryOp::Subtract => x.checked_sub(y),
                BinaryOp::Multiply => x.checked_mul(y),
                BinaryOp::Divide => x.checked_div(y),
                _ => x.checked_rem(y),
            };
            integer(v.ok_or_else(overflow)?, ty)
        }
        Pair::Float(x, y) => {
            let v = match op {
                BinaryOp::Add => x + y,
                BinaryOp::Subtract => x - y,
                BinaryOp::Multiply => x * y,
                BinaryOp::Divide => x / y,
                _ => x % y,
            };
            Ok(match ty.non_nullable() {
                TypeRef::F32 => Value::F32(v as f32),
                _ => Value::F64(v),
            })
        }
        Pair::Dec(x, y) => {
            let v = match op {
                BinaryOp::Add => x.checked_add(y),
                BinaryOp::Subtract => x.checked_sub(y),
                BinaryOp::Multiply => x.checked_mul(y),
                BinaryOp::Divide => x.checked_div(y),
                _ => x.checked_rem(y),
            };
            v.map(Value::Decimal).ok_or_else(overflow)
        }
    }
}
