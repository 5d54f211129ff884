//! 10/11/16-bit floating point codecs.
//!
//! ```text
//! f10: | exponent(5) | mantissa(5)  |
//! f11: | exponent(5) | mantissa(6)  |
//! f16: | s | exponent(5) | mantissa(10) |
//! f32: | s | exponent(8) | mantissa(23) |
//! ```
//!
//! All three share a 5-bit exponent with bias 15. Re-biasing from `f32` subtracts 112.
//! Exponents that underflow flush to zero and exponents that overflow saturate to infinity.
//! The 10 and 11-bit formats have no sign bit, so negative inputs encode as zero.

use crate::foundation::error::{RecipeError, RecipeResult};

const EXPONENT_REBIAS: u32 = 112;
const SMALL_EXPONENT_MAX: u32 = 31;

struct Parts {
    sign: u32,
    exponent: Option<u32>,
    mantissa: u32,
}

// `exponent` is `None` when the value flushes to zero.
fn split(value: f32) -> Parts {
    let hex = value.to_bits();
    let sign = hex >> 31;
    let raw_exp = (hex >> 23) & 0xff;
    let mantissa = hex & ((1 << 23) - 1);

    let exponent = if raw_exp == 0xff {
        Some(SMALL_EXPONENT_MAX)
    } else if raw_exp <= EXPONENT_REBIAS {
        None
    } else if raw_exp - EXPONENT_REBIAS >= SMALL_EXPONENT_MAX {
        return Parts {
            sign,
            exponent: Some(SMALL_EXPONENT_MAX),
            mantissa: 0,
        };
    } else {
        Some(raw_exp - EXPONENT_REBIAS)
    };

    Parts {
        sign,
        exponent,
        mantissa,
    }
}

fn join(sign: u32, exponent: u32, mantissa: u32) -> f32 {
    let raw_exp = if exponent == 0 && mantissa == 0 {
        return f32::from_bits(sign << 31);
    } else if exponent == SMALL_EXPONENT_MAX {
        0xff
    } else {
        exponent + EXPONENT_REBIAS
    };
    f32::from_bits((sign << 31) | (raw_exp << 23) | mantissa)
}

/// Encode `value` as a signed 16-bit float.
pub fn float_to_hex_float16(value: f32) -> u16 {
    let p = split(value);
    let Some(exponent) = p.exponent else {
        return (p.sign << 15) as u16;
    };
    ((p.sign << 15) | (exponent << 10) | (p.mantissa >> 13)) as u16
}

/// Encode `value` as an unsigned 11-bit float.
pub fn float_to_hex_float11(value: f32) -> u16 {
    let p = split(value);
    match p.exponent {
        Some(exponent) if p.sign == 0 => ((exponent << 6) | (p.mantissa >> 17)) as u16,
        _ => 0,
    }
}

/// Encode `value` as an unsigned 10-bit float.
pub fn float_to_hex_float10(value: f32) -> u16 {
    let p = split(value);
    match p.exponent {
        Some(exponent) if p.sign == 0 => ((exponent << 5) | (p.mantissa >> 18)) as u16,
        _ => 0,
    }
}

/// Encode `value` with the small-float layout selected by `bits`.
pub fn float_to_hex_float(value: f32, bits: u32) -> RecipeResult<u16> {
    match bits {
        16 => Ok(float_to_hex_float16(value)),
        11 => Ok(float_to_hex_float11(value)),
        10 => Ok(float_to_hex_float10(value)),
        other => Err(RecipeError::codec(format!(
            "Invalid small float bits: {other}"
        ))),
    }
}

/// Decode the low `bits` bits of `hex` back into an `f32`.
pub fn hex_float_to_float(hex: u16, bits: u32) -> RecipeResult<f32> {
    let hex = u32::from(hex);
    match bits {
        16 => Ok(join(hex >> 15, (hex >> 10) & 0x1f, (hex & 0x3ff) << 13)),
        11 => Ok(join(0, (hex >> 6) & 0x1f, (hex & 0x3f) << 17)),
        10 => Ok(join(0, (hex >> 5) & 0x1f, (hex & 0x1f) << 18)),
        other => Err(RecipeError::codec(format!(
            "Invalid small float bits: {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/small_float.rs"]
mod tests;
