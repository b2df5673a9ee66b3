//! Built-in literal writers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::SecondsFormat;
use remoteq_core::Value;

use super::iso8601_duration;
use crate::{Error, Result};

fn mismatch(expected: &str, value: &Value) -> Error {
    Error::InvalidArgument(format!(
        "{expected} writer received a `{}` value",
        value.runtime_type()
    ))
}

pub(super) fn write_null(_: &Value) -> Result<String> {
    Ok("null".to_string())
}

pub(super) fn write_bool(value: &Value) -> Result<String> {
    match value {
        Value::Bool(true) => Ok("true".to_string()),
        Value::Bool(false) => Ok("false".to_string()),
        other => Err(mismatch("bool", other)),
    }
}

pub(super) fn write_binary(value: &Value) -> Result<String> {
    match value {
        Value::Binary(bytes) => Ok(binary_literal(bytes)),
        other => Err(mismatch("binary", other)),
    }
}

pub(super) fn write_stream(value: &Value) -> Result<String> {
    match value {
        Value::Stream(stream) => {
            let bytes = stream.read_to_end()?;
            Ok(binary_literal(&bytes))
        }
        other => Err(mismatch("stream", other)),
    }
}

fn binary_literal(bytes: &[u8]) -> String {
    format!("X'{}'", STANDARD.encode(bytes))
}

pub(super) fn write_datetime(value: &Value) -> Result<String> {
    match value {
        Value::DateTime(dt) => Ok(format!(
            "datetime'{}'",
            dt.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )),
        other => Err(mismatch("datetime", other)),
    }
}

pub(super) fn write_datetime_offset(value: &Value) -> Result<String> {
    match value {
        Value::DateTimeOffset(dt) => Ok(format!(
            "datetimeoffset'{}'",
            dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
        )),
        other => Err(mismatch("datetimeoffset", other)),
    }
}

pub(super) fn write_time(value: &Value) -> Result<String> {
    match value {
        Value::TimeSpan(delta) => Ok(format!("time'{}'", iso8601_duration(*delta))),
        other => Err(mismatch("time", other)),
    }
}

pub(super) fn write_decimal(value: &Value) -> Result<String> {
    match value {
        Value::Decimal(d) => Ok(format!("{d}m")),
        other => Err(mismatch("decimal", other)),
    }
}

pub(super) fn write_single(value: &Value) -> Result<String> {
    match value {
        Value::F32(v) => Ok(non_finite(f64::from(*v)).map_or_else(|| format!("{v}f"), str::to_owned)),
        other => Err(mismatch("single", other)),
    }
}

pub(super) fn write_double(value: &Value) -> Result<String> {
    match value {
        Value::F64(v) => Ok(non_finite(*v).map_or_else(|| v.to_string(), str::to_owned)),
        other => Err(mismatch("double", other)),
    }
}

/// Protocol keyword for NaN and the infinities.
fn non_finite(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some("NaN")
    } else if v.is_infinite() {
        Some(if v > 0.0 { "INF" } else { "-INF" })
    } else {
        None
    }
}

pub(super) fn write_integer(value: &Value) -> Result<String> {
    value
        .as_integer()
        .map(|v| v.to_string())
        .ok_or_else(|| mismatch("integer", value))
}

pub(super) fn write_guid(value: &Value) -> Result<String> {
    match value {
        Value::Guid(g) => Ok(format!("guid'{}'", g.hyphenated())),
        other => Err(mismatch("guid", other)),
    }
}

/// Embedded quotes are not escaped.
pub(super) fn write_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(format!("'{s}'")),
        other => Err(mismatch("string", other)),
    }
}

pub(super) fn write_enum(value: &Value) -> Result<String> {
    match value {
        Value::Enum { type_name, member } => Ok(format!("{type_name}'{member}'")),
        other => Err(mismatch("enum", other)),
    }
}
