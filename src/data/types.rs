use serde::Serialize;

/// Numeric interpretation of a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatMode {
    /// Signed integer.
    SInt,
    /// Unsigned integer.
    UInt,
    /// Signed normalized.
    SNorm,
    /// Unsigned normalized.
    UNorm,
    /// Signed scaled.
    SScaled,
    /// Unsigned scaled.
    UScaled,
    /// Signed float.
    SFloat,
    /// Unsigned float.
    UFloat,
    /// sRGB encoded unsigned normalized.
    Srgb,
}

impl FormatMode {
    /// Integer-backed modes with a sign.
    pub fn is_signed_int(self) -> bool {
        matches!(self, Self::SInt | Self::SNorm | Self::SScaled)
    }

    /// Integer-backed modes without a sign.
    pub fn is_unsigned_int(self) -> bool {
        matches!(self, Self::UInt | Self::UNorm | Self::UScaled | Self::Srgb)
    }

    /// Float-backed modes.
    pub fn is_float(self) -> bool {
        matches!(self, Self::SFloat | Self::UFloat)
    }

    /// Normalized modes (`unorm`, `snorm`, `srgb`).
    pub fn is_normalized(self) -> bool {
        matches!(self, Self::UNorm | Self::SNorm | Self::Srgb)
    }

    /// Upper-case suffix used in Vulkan format names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::SInt => "SINT",
            Self::UInt => "UINT",
            Self::SNorm => "SNORM",
            Self::UNorm => "UNORM",
            Self::SScaled => "SSCALED",
            Self::UScaled => "USCALED",
            Self::SFloat => "SFLOAT",
            Self::UFloat => "UFLOAT",
            Self::Srgb => "SRGB",
        }
    }
}

/// Channel a component feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FormatComponentType {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha.
    A,
    /// Depth.
    D,
    /// Stencil.
    S,
    /// Unused.
    X,
}

impl FormatComponentType {
    /// Letter used in Vulkan format names.
    pub fn letter(self) -> char {
        match self {
            Self::R => 'R',
            Self::G => 'G',
            Self::B => 'B',
            Self::A => 'A',
            Self::D => 'D',
            Self::S => 'S',
            Self::X => 'X',
        }
    }

    /// Channel for the `i`-th row of a vector (`R`, `G`, `B`, `A`).
    pub fn for_row(i: usize) -> Self {
        match i {
            0 => Self::R,
            1 => Self::G,
            2 => Self::B,
            _ => Self::A,
        }
    }
}

/// Signed 8-bit integer storage.
pub fn is_int8(mode: FormatMode, bits: u32) -> bool {
    mode.is_signed_int() && bits == 8
}
/// Signed 16-bit integer storage.
pub fn is_int16(mode: FormatMode, bits: u32) -> bool {
    mode.is_signed_int() && bits == 16
}
/// Signed 32-bit integer storage.
pub fn is_int32(mode: FormatMode, bits: u32) -> bool {
    mode.is_signed_int() && bits == 32
}
/// Signed 64-bit integer storage.
pub fn is_int64(mode: FormatMode, bits: u32) -> bool {
    mode.is_signed_int() && bits == 64
}
/// Unsigned 8-bit integer storage.
pub fn is_uint8(mode: FormatMode, bits: u32) -> bool {
    mode.is_unsigned_int() && bits == 8
}
/// Unsigned 16-bit integer storage.
pub fn is_uint16(mode: FormatMode, bits: u32) -> bool {
    mode.is_unsigned_int() && bits == 16
}
/// Unsigned 32-bit integer storage.
pub fn is_uint32(mode: FormatMode, bits: u32) -> bool {
    mode.is_unsigned_int() && bits == 32
}
/// Unsigned 64-bit integer storage.
pub fn is_uint64(mode: FormatMode, bits: u32) -> bool {
    mode.is_unsigned_int() && bits == 64
}
/// 16-bit float storage.
pub fn is_float16(mode: FormatMode, bits: u32) -> bool {
    mode.is_float() && bits == 16
}
/// 32-bit float storage.
pub fn is_float32(mode: FormatMode, bits: u32) -> bool {
    mode.is_float() && bits == 32
}
/// 64-bit float storage.
pub fn is_float64(mode: FormatMode, bits: u32) -> bool {
    mode.is_float() && bits == 64
}

/// Scalar, vector or matrix of a single numeric mode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Number {
    /// Numeric mode.
    pub mode: FormatMode,
    /// Width of one scalar.
    pub bits: u32,
    /// Rows (vector length).
    pub row_count: u32,
    /// Columns (1 unless this is a matrix).
    pub column_count: u32,
}

impl Number {
    /// Scalar of `mode` with `bits` width.
    pub fn new(mode: FormatMode, bits: u32) -> Self {
        Self {
            mode,
            bits,
            row_count: 1,
            column_count: 1,
        }
    }

    /// Signed integer scalar.
    pub fn int(bits: u32) -> Self {
        Self::new(FormatMode::SInt, bits)
    }

    /// Unsigned integer scalar.
    pub fn uint(bits: u32) -> Self {
        Self::new(FormatMode::UInt, bits)
    }

    /// Float scalar.
    pub fn float(bits: u32) -> Self {
        Self::new(FormatMode::SFloat, bits)
    }

    /// Same scalar stretched to a `rows`-element vector.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.row_count = rows;
        self
    }

    /// Same vector repeated over `cols` columns.
    pub fn with_columns(mut self, cols: u32) -> Self {
        self.column_count = cols;
        self
    }

    /// Bytes of one scalar.
    pub fn size_in_bytes(&self) -> u32 {
        self.bits.div_ceil(8)
    }
}

/// One named member of a [`List`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ListMember {
    /// Channel the member feeds.
    pub name: FormatComponentType,
    /// Numeric mode.
    pub mode: FormatMode,
    /// Width in bits.
    pub bits: u32,
}

impl ListMember {
    /// Bytes of this member rounded up.
    pub fn size_in_bytes(&self) -> u32 {
        self.bits.div_ceil(8)
    }
}

/// Ordered channel list, as used by image formats.
///
/// A non-zero `pack_size_in_bits` makes the whole list a single opaque slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct List {
    /// Members in memory order.
    pub members: Vec<ListMember>,
    /// Pack width, or 0 when unpacked.
    pub pack_size_in_bits: u32,
}

impl List {
    /// Append a member.
    pub fn add_member(&mut self, name: FormatComponentType, mode: FormatMode, bits: u32) {
        self.members.push(ListMember { name, mode, bits });
    }

    /// True when the list is one packed slot.
    pub fn is_packed(&self) -> bool {
        self.pack_size_in_bits > 0
    }

    /// Bytes of one element.
    pub fn size_in_bytes(&self) -> u32 {
        if self.is_packed() {
            return self.pack_size_in_bits / 8;
        }
        self.members.iter().map(ListMember::size_in_bytes).sum()
    }
}

/// Element type of a buffer or image.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// Scalar, vector or matrix.
    Number(Number),
    /// Image-style channel list.
    List(List),
}

impl Type {
    /// Rows of the type: vector length, or member count for lists.
    pub fn row_count(&self) -> u32 {
        match self {
            Self::Number(n) => n.row_count,
            Self::List(l) => l.members.len() as u32,
        }
    }

    /// Columns of the type; always 1 for lists.
    pub fn column_count(&self) -> u32 {
        match self {
            Self::Number(n) => n.column_count,
            Self::List(_) => 1,
        }
    }

    /// True for a 3-row vector that is not a matrix.
    pub fn is_vec3(&self) -> bool {
        self.row_count() == 3 && self.column_count() == 1
    }

    /// True for matrices.
    pub fn is_matrix(&self) -> bool {
        self.column_count() > 1
    }

    /// The list form, if any.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            Self::Number(_) => None,
        }
    }

    /// The number form, if any.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            Self::List(_) => None,
        }
    }

    /// True for packed lists.
    pub fn is_packed(&self) -> bool {
        self.as_list().is_some_and(List::is_packed)
    }

    /// Unpadded bytes of one element.
    pub fn size_in_bytes(&self) -> u32 {
        match self {
            Self::Number(n) => n.size_in_bytes() * n.row_count * n.column_count,
            Self::List(l) => l.size_in_bytes(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/types.rs"]
mod tests;
