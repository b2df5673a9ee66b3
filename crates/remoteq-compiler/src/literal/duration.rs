//! ISO-8601 duration text for time intervals.

use std::fmt::Write;

use chrono::TimeDelta;

const SECONDS_PER_DAY: u64 = 86_400;

/// Format `delta` as an ISO-8601 duration (`P1DT2H3M4.5S`, `PT0S`, `-PT5S`).
///
/// Days are the largest unit; years and months are never emitted because
/// their length is not fixed.
pub fn iso8601_duration(delta: TimeDelta) -> String {
    let secs = delta.num_seconds();
    let nanos = delta.subsec_nanos();
    let negative = secs < 0 || nanos < 0;

    let mut secs = secs.unsigned_abs();
    let nanos = nanos.unsigned_abs();

    let days = secs / SECONDS_PER_DAY;
    secs %= SECONDS_PER_DAY;
    let hours = secs / 3600;
    secs %= 3600;
    let minutes = secs / 60;
    secs %= 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('P');
    if days > 0 {
        let _ = write!(out, "{days}D");
    }

    let has_time = hours > 0 || minutes > 0 || secs > 0 || nanos > 0;
    if !has_time {
        if days == 0 {
            out.push_str("T0S");
        }
        return out;
    }

    out.push('T');
    if hours > 0 {
        let _ = write!(out, "{hours}H");
    }
    if minutes > 0 {
        let _ = write!(out, "{minutes}M");
    }
    if secs > 0 || nanos > 0 {
        let _ = write!(out, "{secs}");
        if nanos > 0 {
            let fraction = format!("{nanos:09}");
            let _ = write!(out, ".{}", fraction.trim_end_matches('0'));
        }
        out.push('S');
    }
    out
}
