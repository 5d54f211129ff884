use serde::Serialize;

use crate::data::format_type::FormatType;
use crate::data::types::{
    FormatComponentType, FormatMode, ListMember, Number, Type, is_float16, is_float32, is_float64,
    is_int8, is_int16, is_int32, is_int64, is_uint8, is_uint16, is_uint32, is_uint64,
};

/// Memory layout rule applied when a [`Type`] is laid out in a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Uniform-buffer rules: 3-vectors and matrix columns round up to 4 slots.
    Std140,
    /// Storage-buffer rules: 3-vectors round up to 4 slots.
    #[default]
    Std430,
    /// No padding at all.
    Packed,
}

/// One slot of an element in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Bytes that hold no input value.
    Padding {
        /// Width of the gap.
        bytes: u32,
    },
    /// A value-bearing component.
    Component {
        /// Channel fed by this slot.
        name: FormatComponentType,
        /// Numeric mode.
        mode: FormatMode,
        /// Width in bits.
        bits: u32,
    },
}

impl Segment {
    /// True for padding slots.
    pub fn is_padding(&self) -> bool {
        matches!(self, Self::Padding { .. })
    }

    /// Width of the slot in bits.
    pub fn num_bits(&self) -> u32 {
        match *self {
            Self::Padding { bytes } => bytes * 8,
            Self::Component { bits, .. } => bits,
        }
    }

    /// Width of the slot in whole bytes.
    pub fn size_in_bytes(&self) -> u32 {
        self.num_bits().div_ceil(8)
    }
}

/// A [`Type`] laid out under a [`Layout`], optionally tagged with a Vulkan format.
///
/// The number of *input* values an element needs can be smaller than the number of slots
/// it occupies: a `vec3` reads three values but fills four slots under std140/std430.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Format {
    format_type: FormatType,
    layout: Layout,
    #[serde(rename = "type")]
    ty: Type,
    segments: Vec<Segment>,
}

impl Format {
    /// Lay out `ty` with the default (std430) rules.
    pub fn new(ty: Type) -> Self {
        let mut fmt = Self {
            format_type: FormatType::Unknown,
            layout: Layout::default(),
            ty,
            segments: Vec::new(),
        };
        fmt.rebuild_segments();
        fmt
    }

    /// Lay out `ty` and tag it with the format named by [`Format::generate_name`].
    pub fn with_derived_format_type(ty: Type) -> Self {
        let mut fmt = Self::new(ty);
        if let Some(name) = fmt.generate_name() {
            fmt.format_type = FormatType::from_name(&name);
        }
        fmt
    }

    /// Element type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The type when it is a plain number.
    pub fn only_type(&self) -> Option<&Number> {
        self.ty.as_number()
    }

    /// Vulkan format tag.
    pub fn format_type(&self) -> FormatType {
        self.format_type
    }

    /// Set the Vulkan format tag.
    pub fn set_format_type(&mut self, format_type: FormatType) {
        self.format_type = format_type;
    }

    /// True when the tag is not [`FormatType::Unknown`].
    pub fn is_format_known(&self) -> bool {
        self.format_type != FormatType::Unknown
    }

    /// Layout rule in effect.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Switch layout and recompute segments.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.rebuild_segments();
    }

    /// Slots of one element, padding included.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Bytes of one element, padding included.
    pub fn size_in_bytes(&self) -> u32 {
        self.segments.iter().map(Segment::size_in_bytes).sum()
    }

    /// Input values consumed by one element.
    pub fn input_needed_per_element(&self) -> u32 {
        self.segments.iter().filter(|s| !s.is_padding()).count() as u32
    }

    /// Rows of the element type.
    pub fn row_count(&self) -> u32 {
        self.ty.row_count()
    }

    /// Columns of the element type.
    pub fn column_count(&self) -> u32 {
        self.ty.column_count()
    }

    /// Channels per column.
    pub fn component_count(&self) -> u32 {
        self.ty.row_count()
    }

    /// Pack width for packed formats.
    pub fn pack_size(&self) -> Option<u32> {
        self.ty
            .as_list()
            .filter(|l| l.is_packed())
            .map(|l| l.pack_size_in_bits)
    }

    /// True when the whole element is one packed slot.
    pub fn is_packed(&self) -> bool {
        self.ty.is_packed()
    }

    /// Channels of one column, in memory order.
    pub fn components(&self) -> Vec<ListMember> {
        match &self.ty {
            Type::List(l) => l.members.clone(),
            Type::Number(n) => (0..n.row_count as usize)
                .map(|i| ListMember {
                    name: FormatComponentType::for_row(i),
                    mode: n.mode,
                    bits: n.bits,
                })
                .collect(),
        }
    }

    /// True when every component has `mode` and `bits`.
    pub fn are_all_components(&self, mode: FormatMode, bits: u32) -> bool {
        self.components()
            .iter()
            .all(|c| c.mode == mode && c.bits == bits)
    }

    /// Structural equality: layout, tag, shape, modes and widths.
    pub fn equal(&self, other: &Format) -> bool {
        self == other
    }

    /// True for formats with a stencil aspect.
    pub fn has_stencil_component(&self) -> bool {
        self.format_type.has_stencil_component()
    }

    /// True when every component is normalized.
    pub fn is_normalized(&self) -> bool {
        match &self.ty {
            Type::Number(n) => n.mode.is_normalized(),
            Type::List(l) => l.members.iter().all(|m| m.mode.is_normalized()),
        }
    }

    fn number_matches(&self, pred: fn(FormatMode, u32) -> bool) -> bool {
        self.only_type().is_some_and(|n| pred(n.mode, n.bits))
    }

    /// All components are 8-bit signed integers.
    pub fn is_int8(&self) -> bool {
        self.number_matches(is_int8)
    }
    /// All components are 16-bit signed integers.
    pub fn is_int16(&self) -> bool {
        self.number_matches(is_int16)
    }
    /// All components are 32-bit signed integers.
    pub fn is_int32(&self) -> bool {
        self.number_matches(is_int32)
    }
    /// All components are 64-bit signed integers.
    pub fn is_int64(&self) -> bool {
        self.number_matches(is_int64)
    }
    /// All components are 8-bit unsigned integers.
    pub fn is_uint8(&self) -> bool {
        self.number_matches(is_uint8)
    }
    /// All components are 16-bit unsigned integers.
    pub fn is_uint16(&self) -> bool {
        self.number_matches(is_uint16)
    }
    /// All components are 32-bit unsigned integers.
    pub fn is_uint32(&self) -> bool {
        self.number_matches(is_uint32)
    }
    /// All components are 64-bit unsigned integers.
    pub fn is_uint64(&self) -> bool {
        self.number_matches(is_uint64)
    }
    /// All components are 16-bit floats.
    pub fn is_float16(&self) -> bool {
        self.number_matches(is_float16)
    }
    /// All components are 32-bit floats.
    pub fn is_float32(&self) -> bool {
        self.number_matches(is_float32)
    }
    /// All components are 64-bit floats.
    pub fn is_float64(&self) -> bool {
        self.number_matches(is_float64)
    }

    /// Vulkan-style name for the layout, e.g. `R32G32B32_SFLOAT`.
    ///
    /// Matrices have no such name.
    pub fn generate_name(&self) -> Option<String> {
        if self.ty.is_matrix() {
            return None;
        }
        let comps = self.components();
        let first = comps.first()?;
        let uniform_mode = comps.iter().all(|c| c.mode == first.mode);

        let mut name = String::new();
        for c in &comps {
            name.push(c.name.letter());
            name.push_str(&c.bits.to_string());
            if !uniform_mode {
                name.push('_');
                name.push_str(c.mode.suffix());
                name.push('_');
            }
        }
        if uniform_mode {
            name.push('_');
            name.push_str(first.mode.suffix());
        }
        let mut name = name.trim_end_matches('_').to_owned();
        if let Some(pack) = self.pack_size() {
            name.push_str(&format!("_PACK{pack}"));
        }
        Some(name)
    }

    fn rebuild_segments(&mut self) {
        self.segments.clear();

        let n = match &self.ty {
            Type::List(l) if l.is_packed() => {
                self.segments.push(Segment::Component {
                    name: FormatComponentType::R,
                    mode: FormatMode::UInt,
                    bits: l.pack_size_in_bits,
                });
                return;
            }
            Type::List(l) => {
                self.segments
                    .extend(l.members.iter().map(|m| Segment::Component {
                        name: m.name,
                        mode: m.mode,
                        bits: m.bits,
                    }));
                return;
            }
            Type::Number(n) => n.clone(),
        };

        let pad_rows = match self.layout {
            Layout::Packed => 0,
            Layout::Std140 if n.column_count > 1 => 4u32.saturating_sub(n.row_count),
            _ if n.row_count == 3 => 1,
            _ => 0,
        };

        for _ in 0..n.column_count {
            for row in 0..n.row_count as usize {
                self.segments.push(Segment::Component {
                    name: FormatComponentType::for_row(row),
                    mode: n.mode,
                    bits: n.bits,
                });
            }
            for _ in 0..pad_rows {
                self.segments.push(Segment::Padding {
                    bytes: n.size_in_bytes(),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/format.rs"]
mod tests;
