//! Decimal rendering of `f32` values for ASCII PLY payloads.
//!
//! Values are written with the shortest digit string that reads back to the
//! same `f32`. Magnitudes in `[1e-3, 1e7)` use plain notation and always carry
//! a fractional part (`1.0`, `0.25`); everything else uses an `e` exponent
//! (`1.0e-5`, `1.5e10`), the only exponent form the PLY ASCII grammar
//! accepts. Non-finite values are written as `NaN`, `Infinity` and
//! `-Infinity`; those cannot be read back from ASCII.

use std::fmt::Write;

const PLAIN_MIN: f32 = 1e-3;
const PLAIN_MAX: f32 = 1e7;

/// Appends the decimal form of `value` to `out`.
pub fn push_float(out: &mut String, value: f32) {
    if value.is_nan() {
        out.push_str("NaN");
        return;
    }
    if value.is_infinite() {
        out.push_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }

    let magnitude = value.abs();
    let plain = magnitude < PLAIN_MAX && !(magnitude > 0.0 && magnitude < PLAIN_MIN);
    let start = out.len();
    // Writing into a String cannot fail.
    let _ = if plain {
        write!(out, "{value}")
    } else {
        write!(out, "{value:e}")
    };
    let mantissa_end = out[start..].find('e').map_or(out.len(), |at| start + at);
    if !out[start..mantissa_end].contains('.') {
        out.insert_str(mantissa_end, ".0");
    }
}

/// Returns the decimal form of `value`.
#[must_use]
pub fn float_text(value: f32) -> String {
    let mut out = String::new();
    push_float(&mut out, value);
    out
}
