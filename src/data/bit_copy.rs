//! Bit-granular copies between values and byte buffers.

use crate::data::small_float::float_to_hex_float;
use crate::foundation::error::{RecipeError, RecipeResult};
use crate::foundation::value::Value;

/// Write `value` into `dst` as a `bits`-wide field starting `dst_bit_offset` bits in.
///
/// Integers are truncated to the smallest of 8/16/32/64 bits that holds `bits`; floats are
/// written as `f64`, `f32`, or one of the 16/11/10-bit small floats. Only the bits in
/// `[dst_bit_offset, dst_bit_offset + bits)` of `dst` change.
pub fn copy_value_to_buffer(
    dst: &mut [u8],
    value: &Value,
    dst_bit_offset: u32,
    bits: u32,
) -> RecipeResult<()> {
    let data: u64 = match value {
        Value::Int(_) => match bits {
            0..=8 => u64::from(value.as_uint8()),
            9..=16 => u64::from(value.as_uint16()),
            17..=32 => u64::from(value.as_uint32()),
            33..=64 => value.as_uint64(),
            _ => return Err(RecipeError::codec("Invalid int bits for CopyValueToBuffer")),
        },
        Value::Double(_) => match bits {
            64 => value.as_double().to_bits(),
            32 => u64::from(value.as_float().to_bits()),
            16 | 11 | 10 => u64::from(float_to_hex_float(value.as_float(), bits)?),
            _ => {
                return Err(RecipeError::codec(
                    "Invalid float bits for CopyValueToBuffer",
                ));
            }
        },
    };

    let skip = (dst_bit_offset / 8) as usize;
    let bit_offset = dst_bit_offset % 8;
    let dst = dst.get_mut(skip..).unwrap_or_default();

    copy_bits(dst, u128::from(data) << bit_offset, bit_offset, bits)
}

/// Extract `bits` bits of `src`, starting `src_bit_offset` bits in, into the low bits of `dst`.
pub fn copy_memory_to_buffer(
    dst: &mut [u8],
    src: &[u8],
    src_bit_offset: u32,
    bits: u32,
) -> RecipeResult<()> {
    if bits > 64 {
        return Err(RecipeError::codec(
            "Invalid bits for CopyMemoryToBuffer",
        ));
    }
    let skip = (src_bit_offset / 8) as usize;
    let bit_offset = src_bit_offset % 8;
    let src = src.get(skip..).unwrap_or_default();

    let needed = (bit_offset + bits).div_ceil(8) as usize;
    let mut staging = [0u8; 16];
    for (slot, byte) in staging.iter_mut().zip(src.iter().take(needed)) {
        *slot = *byte;
    }

    copy_bits(dst, u128::from_le_bytes(staging) >> bit_offset, 0, bits)
}

// Masked per-byte merge of the low bytes of `src` into `dst`. Only the first byte honours
// `bit_offset`; later bytes start at bit 0.
fn copy_bits(dst: &mut [u8], src: u128, mut bit_offset: u32, mut bits: u32) -> RecipeResult<()> {
    debug_assert!(bit_offset < 8);

    let needed = (bit_offset + bits).div_ceil(8) as usize;
    if dst.len() < needed {
        return Err(RecipeError::codec(format!(
            "destination too small for {bits} bit copy"
        )));
    }

    let src = src.to_le_bytes();
    let mut i = 0usize;
    while bit_offset + bits > 0 {
        let target_bits = bits.min(8 - bit_offset);
        let mask = (((1u32 << target_bits) - 1) << bit_offset) as u8;
        dst[i] = (src[i] & mask) | (dst[i] & !mask);

        bit_offset = 0;
        bits -= target_bits;
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/data/bit_copy.rs"]
mod tests;
