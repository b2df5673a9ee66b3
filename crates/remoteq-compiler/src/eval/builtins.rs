//! Member reads and pure helper calls the evaluator knows.

use chrono::{Datelike, Timelike};
use remoteq_core::{ENUMERABLE_CLASS, MATH_CLASS, MethodCall, TypeRef, Value};

use super::ops::values_equal;
use crate::{Error, Result};

fn length(n: usize) -> Result<Value> {
    i32::try_from(n)
        .map(Value::I32)
        .map_err(|_| Error::InvalidArgument("length exceeds i32".to_string()))
}

fn date_part<T: Datelike + Timelike>(dt: &T, part: &str) -> Option<Value> {
    let v = match part {
        "Year" => dt.year(),
        "Month" => dt.month() as i32,
        "Day" => dt.day() as i32,
        "Hour" => dt.hour() as i32,
        "Minute" => dt.minute() as i32,
        "Second" => dt.second() as i32,
        _ => return None,
    };
    Some(Value::I32(v))
}

pub(super) fn read_member(target: &Value, declaring_type: &TypeRef, member: &str) -> Result<Value> {
    let value = match (target, member) {
        (Value::Record(fields), _) => {
            return fields.get(member).cloned().ok_or_else(|| {
                Error::InvalidArgument(format!("record has no field `{member}`"))
            });
        }
        (Value::Null, _) => {
            return Err(Error::InvalidArgument(format!(
                "member `{member}` read on null"
            )));
        }
        (Value::String(s), "Length") => Some(length(s.chars().count())?),
        (Value::Binary(b), "Length") => Some(length(b.len())?),
        (Value::List(items), "Length" | "Count") => Some(length(items.len())?),
        (Value::DateTime(dt), part) => date_part(dt, part),
        (Value::DateTimeOffset(dt), part) => date_part(dt, part),
        _ => None,
    };
    value.ok_or_else(|| Error::UnsupportedMethod {
        declaring_type: declaring_type.name(),
        method: member.to_string(),
    })
}

pub(super) fn call(call: &MethodCall, target: Option<Value>, args: &[Value]) -> Result<Value> {
    let result = match target {
        Some(Value::Null) => {
            return Err(Error::InvalidArgument(format!(
                "`{}` called on null",
                call.method
            )));
        }
        Some(Value::String(s)) => string_method(&s, &call.method, args)?,
        Some(target) => instance_method(&target, &call.method, args)?,
        None => static_method(&call.declaring_type, &call.method, args)?,
    };
    result.ok_or_else(|| Error::UnsupportedMethod {
        declaring_type: call.declaring_type.name(),
        method: call.method.clone(),
    })
}

fn char_index(s: &str, index: &Value) -> Result<usize> {
    let len = s.chars().count();
    index
        .as_integer()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i <= len)
        .ok_or_else(|| Error::InvalidArgument(format!("index {index:?} is out of range")))
}

fn string_method(s: &str, method: &str, args: &[Value]) -> Result<Option<Value>> {
    use remoteq_core::Value::String as Str;

    Ok(Some(match (method, args) {
        ("Contains", [Str(x)]) => Value::Bool(s.contains(x.as_str())),
        ("StartsWith", [Str(x)]) => Value::Bool(s.starts_with(x.as_str())),
        ("EndsWith", [Str(x)]) => Value::Bool(s.ends_with(x.as_str())),
        ("IndexOf", [Str(x)]) => match s.find(x.as_str()) {
            Some(byte) => length(s[..byte].chars().count())?,
            None => Value::I32(-1),
        },
        ("Replace", [Str(from), Str(_)]) if from.is_empty() => {
            return Err(Error::InvalidArgument(
                "replaced substring is empty".to_string(),
            ));
        }
        ("Replace", [Str(from), Str(to)]) => Str(s.replace(from.as_str(), to)),
        ("Substring", [start]) => {
            let start = char_index(s, start)?;
            Str(s.chars().skip(start).collect())
        }
        ("Substring", [start, count]) => {
            let rest: String = s.chars().skip(char_index(s, start)?).collect();
            let count = char_index(&rest, count)?;
            Str(rest.chars().take(count).collect())
        }
        ("ToLower" | "ToLowerInvariant", []) => Str(s.to_lowercase()),
        ("ToUpper" | "ToUpperInvariant", []) => Str(s.to_uppercase()),
        ("Trim", []) => Str(s.trim().to_string()),
        ("ToString", []) => Str(s.to_string()),
        ("Equals", [other]) => Value::Bool(matches!(other, Str(o) if o == s)),
        _ => return Ok(None),
    }))
}

fn instance_method(target: &Value, method: &str, args: &[Value]) -> Result<Option<Value>> {
    Ok(match (target, method, args) {
        (_, "Equals", [other]) => Some(Value::Bool(values_equal(target, other)?)),
        (Value::List(items), "Contains", [needle]) => {
            Some(Value::Bool(contains(items, needle)?))
        }
        (_, "ToString", []) => target
            .as_integer()
            .map(|i| Value::String(i.to_string())),
        _ => None,
    })
}

fn contains(items: &[Value], needle: &Value) -> Result<bool> {
    for item in items {
        if values_equal(item, needle)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn static_method(declaring_type: &TypeRef, method: &str, args: &[Value]) -> Result<Option<Value>> {
    if let ("Equals", [a, b]) = (method, args) {
        return Ok(Some(Value::Bool(values_equal(a, b)?)));
    }

    if declaring_type.is_class(MATH_CLASS) {
        return Ok(math(method, args));
    }

    if declaring_type.is_class(ENUMERABLE_CLASS) {
        return Ok(match (method, args) {
            ("Contains", [Value::List(items), needle]) => {
                Some(Value::Bool(contains(items, needle)?))
            }
            ("Count", [Value::List(items)]) => Some(length(items.len())?),
            _ => None,
        });
    }

    if declaring_type.is_string() {
        return Ok(match (method, args) {
            ("IsNullOrEmpty", [Value::Null]) => Some(Value::Bool(true)),
            ("IsNullOrEmpty", [Value::String(s)]) => Some(Value::Bool(s.is_empty())),
            ("Concat", parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        Value::String(s) => out.push_str(s),
                        Value::Null => {}
                        _ => return Ok(None),
                    }
                }
                Some(Value::String(out))
            }
            _ => None,
        });
    }

    Ok(None)
}

/// Rounding is to nearest even, like the host platform's default.
fn math(method: &str, args: &[Value]) -> Option<Value> {
    Some(match (method, args) {
        ("Floor", [Value::F64(v)]) => Value::F64(v.floor()),
        ("Ceiling", [Value::F64(v)]) => Value::F64(v.ceil()),
        ("Round", [Value::F64(v)]) => Value::F64(v.round_ties_even()),
        ("Abs", [Value::F64(v)]) => Value::F64(v.abs()),
        ("Floor", [Value::Decimal(v)]) => Value::Decimal(v.floor()),
        ("Ceiling", [Value::Decimal(v)]) => Value::Decimal(v.ceil()),
        ("Round", [Value::Decimal(v)]) => Value::Decimal(v.round()),
        ("Abs", [Value::Decimal(v)]) => Value::Decimal(v.abs()),
        ("Abs", [Value::I32(v)]) => Value::I32(v.checked_abs()?),
        ("Abs", [Value::I64(v)]) => Value::I64(v.checked_abs()?),
        _ => return None,
    })
}
