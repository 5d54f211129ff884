//! Legacy datum names: `int`, `uint8_t`, `vec3`, `i16vec2`, `dmat4x3`, ...

use crate::data::format::Format;
use crate::data::type_parser::parse_type;
use crate::data::types::{FormatMode, Number, Type};
use crate::foundation::error::{RecipeError, RecipeResult};

/// Parse a datum name into a [`Type`].
///
/// Names the datum grammar does not know are handed to [`parse_type`], so Vulkan format
/// names are accepted as well.
pub fn parse_datum_type(data: &str) -> RecipeResult<Type> {
    let invalid = || RecipeError::codec(format!("Invalid type provided: {data}"));

    let scalar = match data {
        "int" => Some(Number::int(32)),
        "uint" => Some(Number::uint(32)),
        "int8_t" => Some(Number::int(8)),
        "uint8_t" => Some(Number::uint(8)),
        "int16_t" => Some(Number::int(16)),
        "uint16_t" => Some(Number::uint(16)),
        "int64_t" => Some(Number::int(64)),
        "uint64_t" => Some(Number::uint(64)),
        "float" => Some(Number::float(32)),
        "double" => Some(Number::float(64)),
        _ => None,
    };
    if let Some(n) = scalar {
        return Ok(Type::Number(n));
    }

    if let Some(vec_pos) = data.find("vec") {
        let prefix = &data[..vec_pos];
        let (mode, bits) = vector_prefix(prefix).ok_or_else(invalid)?;
        let rows = match &data[vec_pos + 3..] {
            "" => 4,
            r => digit_in(r, 2..=4).ok_or_else(invalid)?,
        };
        return Ok(Type::Number(Number::new(mode, bits).with_rows(rows)));
    }

    if let Some(mat_pos) = data.find("mat") {
        let bits = match &data[..mat_pos] {
            "" => 32,
            "d" => 64,
            _ => return Err(invalid()),
        };
        let shape = &data[mat_pos + 3..];
        let (cols, rows) = match shape.split_once('x') {
            Some((c, r)) => (
                digit_in(c, 2..=4).ok_or_else(invalid)?,
                digit_in(r, 2..=4).ok_or_else(invalid)?,
            ),
            None if shape.is_empty() => (4, 4),
            None => {
                let c = digit_in(shape, 2..=4).ok_or_else(invalid)?;
                (c, c)
            }
        };
        return Ok(Type::Number(
            Number::new(FormatMode::SFloat, bits)
                .with_rows(rows)
                .with_columns(cols),
        ));
    }

    parse_type(data).ok_or_else(invalid)
}

/// Parse a datum name into a [`Format`] tagged with its Vulkan name where one exists.
pub fn parse_datum_format(data: &str) -> RecipeResult<Format> {
    let ty = parse_datum_type(data)?;
    Ok(Format::with_derived_format_type(ty))
}

// `""`, `i`, `u`, `d`, `i8`, `u16`, `i64` ...
fn vector_prefix(prefix: &str) -> Option<(FormatMode, u32)> {
    let mut chars = prefix.chars();
    let mode_char = chars.next();
    let width = chars.as_str();
    let (mode, default_bits) = match mode_char {
        None => return Some((FormatMode::SFloat, 32)),
        Some('i') => (FormatMode::SInt, 32),
        Some('u') => (FormatMode::UInt, 32),
        Some('d') => (FormatMode::SFloat, 64),
        Some(_) => return None,
    };
    let bits = match width {
        "" => default_bits,
        "8" => 8,
        "16" => 16,
        "64" => 64,
        _ => return None,
    };
    Some((mode, bits))
}

fn digit_in(s: &str, range: std::ops::RangeInclusive<u32>) -> Option<u32> {
    s.parse::<u32>().ok().filter(|n| range.contains(n))
}

#[cfg(test)]
#[path = "../../tests/unit/data/datum_type_parser.rs"]
mod tests;
