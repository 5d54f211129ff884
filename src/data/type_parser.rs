//! Parsing of Vulkan-style format names (`R8G8B8A8_UNORM`) and `gl_type/glsl_type` pairs.

use crate::data::format::Format;
use crate::data::format_type::FormatType;
use crate::data::types::{FormatComponentType, FormatMode, List, ListMember, Number, Type};

/// Parse `data` into a [`Type`].
///
/// Accepts Vulkan format names without the `VK_FORMAT_` prefix, and the legacy
/// `gl_type/glsl_type` spelling (`float/vec2`, `ubyte/vec4`). Returns `None` when the string
/// names no type.
pub fn parse_type(data: &str) -> Option<Type> {
    if data.is_empty() {
        return None;
    }
    if let Some((gl_type, glsl_type)) = data.split_once('/') {
        return parse_glsl_format(gl_type, glsl_type);
    }

    let mut mode = FormatMode::SInt;
    let mut pack_size = 0u32;
    let mut pieces: Vec<ListMember> = Vec::new();

    // Walk backwards so the mode suffix is known before the components it applies to.
    for chunk in data.rsplit('_') {
        match chunk {
            "" => return None,
            "PACK8" => pack_size = 8,
            "PACK16" => pack_size = 16,
            "PACK32" => pack_size = 32,
            "UINT" => mode = FormatMode::UInt,
            "UNORM" => mode = FormatMode::UNorm,
            "UFLOAT" => mode = FormatMode::UFloat,
            "USCALED" => mode = FormatMode::UScaled,
            "SINT" => mode = FormatMode::SInt,
            "SNORM" => mode = FormatMode::SNorm,
            "SSCALED" => mode = FormatMode::SScaled,
            "SFLOAT" => mode = FormatMode::SFloat,
            "SRGB" => mode = FormatMode::Srgb,
            "S8" => pieces.insert(
                0,
                ListMember {
                    name: FormatComponentType::S,
                    mode,
                    bits: 8,
                },
            ),
            _ => {
                let chunk_pieces = parse_component_chunk(chunk, mode)?;
                pieces.splice(0..0, chunk_pieces);
            }
        }
    }

    if pieces.is_empty() {
        return None;
    }

    if pack_size == 0 && pieces.len() == 1 && pieces[0].name == FormatComponentType::R {
        return Some(Type::Number(Number::new(pieces[0].mode, pieces[0].bits)));
    }

    Some(Type::List(List {
        members: pieces,
        pack_size_in_bits: pack_size,
    }))
}

/// Parse `data` into a [`Format`] tagged with the matching [`FormatType`].
pub fn parse_format(data: &str) -> Option<Format> {
    let ty = parse_type(data)?;
    let mut fmt = Format::new(ty);
    let tagged = FormatType::from_name(data);
    if tagged != FormatType::Unknown {
        fmt.set_format_type(tagged);
    } else if let Some(name) = fmt.generate_name() {
        fmt.set_format_type(FormatType::from_name(&name));
    }
    Some(fmt)
}

// `R8G8B8A8`, `D24`, `X8` ...
fn parse_component_chunk(chunk: &str, mode: FormatMode) -> Option<Vec<ListMember>> {
    let mut out = Vec::new();
    let bytes = chunk.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        let name = match bytes[i] {
            b'R' => FormatComponentType::R,
            b'G' => FormatComponentType::G,
            b'B' => FormatComponentType::B,
            b'A' => FormatComponentType::A,
            b'D' => FormatComponentType::D,
            b'X' => FormatComponentType::X,
            _ => return None,
        };
        i += 1;
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let bits: u32 = chunk[start..i].parse().ok()?;
        if bits > 0 {
            out.push(ListMember { name, mode, bits });
        }
    }
    Some(out)
}

fn parse_glsl_format(gl_type: &str, glsl_type: &str) -> Option<Type> {
    let (bits, mode) = match gl_type {
        "byte" => (8, FormatMode::SInt),
        "ubyte" => (8, FormatMode::UInt),
        "short" => (16, FormatMode::SInt),
        "ushort" => (16, FormatMode::UInt),
        "int" => (32, FormatMode::SInt),
        "uint" => (32, FormatMode::UInt),
        "half" => (16, FormatMode::SFloat),
        "float" => (32, FormatMode::SFloat),
        "double" => (64, FormatMode::SFloat),
        _ => return None,
    };

    let components: u32 = match glsl_type {
        "float" | "double" | "int" | "uint" => 1,
        t if t.starts_with("vec") => t[3..].parse().ok().filter(|n| *n >= 2)?,
        t if matches!(t.as_bytes().first(), Some(b'd' | b'i' | b'u'))
            && t.get(1..4) == Some("vec") =>
        {
            t.get(4..)?.parse().ok().filter(|n| *n >= 2)?
        }
        _ => return None,
    };
    if components > 4 {
        return None;
    }

    let mut name = String::new();
    for i in 0..components as usize {
        name.push(FormatComponentType::for_row(i).letter());
        name.push_str(&bits.to_string());
    }
    name.push('_');
    name.push_str(mode.suffix());
    parse_type(&name)
}

#[cfg(test)]
#[path = "../../tests/unit/data/type_parser.rs"]
mod tests;
