//! Constant lookup tables from script spellings to pipeline and sampler enums.
//!
//! Every lookup is case-sensitive and returns `None` for unknown names; callers word the
//! diagnostic. [`parse_boolean`] is the only lookup that folds case.

use crate::recipe::pipeline_data::{
    BlendFactor, BlendOp, COLOR_MASK_A, COLOR_MASK_B, COLOR_MASK_G, COLOR_MASK_R, CompareOp,
    CullMode, FrontFace, LogicOp, PolygonMode, StencilOp, Topology,
};
use crate::recipe::sampler::{AddressMode, BorderColor, FilterType};

type Table<T> = &'static [(&'static str, T)];

fn lookup<T: Copy>(table: Table<T>, name: &str) -> Option<T> {
    table.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

const TOPOLOGIES: Table<Topology> = &[
    ("PATCH_LIST", Topology::PatchList),
    ("POINT_LIST", Topology::PointList),
    ("GL_LINE_STRIP_ADJACENCY", Topology::LineStripWithAdjacency),
    ("GL_LINE_STRIP", Topology::LineStrip),
    ("GL_LINES", Topology::LineList),
    ("GL_LINES_ADJACENCY", Topology::LineListWithAdjacency),
    ("GL_PATCHES", Topology::PatchList),
    ("GL_POINTS", Topology::PointList),
    ("GL_TRIANGLE_STRIP", Topology::TriangleStrip),
    ("GL_TRIANGLE_FAN", Topology::TriangleFan),
    ("GL_TRIANGLES", Topology::TriangleList),
    ("GL_TRIANGLES_ADJACENCY", Topology::TriangleListWithAdjacency),
    ("GL_TRIANGLE_STRIP_ADJACENCY", Topology::TriangleStripWithAdjacency),
    ("LINE_LIST", Topology::LineList),
    ("LINE_LIST_WITH_ADJACENCY", Topology::LineListWithAdjacency),
    ("LINE_STRIP", Topology::LineStrip),
    ("LINE_STRIP_WITH_ADJACENCY", Topology::LineStripWithAdjacency),
    ("TRIANGLE_FAN", Topology::TriangleFan),
    ("TRIANGLE_LIST", Topology::TriangleList),
    ("TRIANGLE_LIST_WITH_ADJACENCY", Topology::TriangleListWithAdjacency),
    ("TRIANGLE_STRIP", Topology::TriangleStrip),
    ("TRIANGLE_STRIP_WITH_ADJACENCY", Topology::TriangleStripWithAdjacency),
];

const VK_TOPOLOGIES: Table<Topology> = &[
    ("VK_PRIMITIVE_TOPOLOGY_PATCH_LIST", Topology::PatchList),
    ("VK_PRIMITIVE_TOPOLOGY_POINT_LIST", Topology::PointList),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_LIST", Topology::LineList),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_LIST_WITH_ADJACENCY", Topology::LineListWithAdjacency),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_STRIP", Topology::LineStrip),
    ("VK_PRIMITIVE_TOPOLOGY_LINE_STRIP_WITH_ADJACENCY", Topology::LineStripWithAdjacency),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_FAN", Topology::TriangleFan),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST", Topology::TriangleList),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST_WITH_ADJACENCY", Topology::TriangleListWithAdjacency),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP", Topology::TriangleStrip),
    ("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_STRIP_WITH_ADJACENCY", Topology::TriangleStripWithAdjacency),
];

const POLYGON_MODES: Table<PolygonMode> = &[
    ("VK_POLYGON_MODE_FILL", PolygonMode::Fill),
    ("VK_POLYGON_MODE_LINE", PolygonMode::Line),
    ("VK_POLYGON_MODE_POINT", PolygonMode::Point),
];

const CULL_MODES: Table<CullMode> = &[
    ("VK_CULL_MODE_NONE", CullMode::None),
    ("VK_CULL_MODE_FRONT_BIT", CullMode::Front),
    ("VK_CULL_MODE_BACK_BIT", CullMode::Back),
    ("VK_CULL_MODE_FRONT_AND_BACK", CullMode::FrontAndBack),
];

const FRONT_FACES: Table<FrontFace> = &[
    ("VK_FRONT_FACE_COUNTER_CLOCKWISE", FrontFace::CounterClockwise),
    ("VK_FRONT_FACE_CLOCKWISE", FrontFace::Clockwise),
];

const LOGIC_OPS: Table<LogicOp> = &[
    ("VK_LOGIC_OP_CLEAR", LogicOp::Clear),
    ("VK_LOGIC_OP_AND", LogicOp::And),
    ("VK_LOGIC_OP_AND_REVERSE", LogicOp::AndReverse),
    ("VK_LOGIC_OP_COPY", LogicOp::Copy),
    ("VK_LOGIC_OP_AND_INVERTED", LogicOp::AndInverted),
    ("VK_LOGIC_OP_NO_OP", LogicOp::NoOp),
    ("VK_LOGIC_OP_XOR", LogicOp::Xor),
    ("VK_LOGIC_OP_OR", LogicOp::Or),
    ("VK_LOGIC_OP_NOR", LogicOp::Nor),
    ("VK_LOGIC_OP_EQUIVALENT", LogicOp::Equivalent),
    ("VK_LOGIC_OP_INVERT", LogicOp::Invert),
    ("VK_LOGIC_OP_OR_REVERSE", LogicOp::OrReverse),
    ("VK_LOGIC_OP_COPY_INVERTED", LogicOp::CopyInverted),
    ("VK_LOGIC_OP_OR_INVERTED", LogicOp::OrInverted),
    ("VK_LOGIC_OP_NAND", LogicOp::Nand),
    ("VK_LOGIC_OP_SET", LogicOp::Set),
];

const VK_BLEND_FACTORS: Table<BlendFactor> = &[
    ("VK_BLEND_FACTOR_ZERO", BlendFactor::Zero),
    ("VK_BLEND_FACTOR_ONE", BlendFactor::One),
    ("VK_BLEND_FACTOR_SRC_COLOR", BlendFactor::SrcColor),
    ("VK_BLEND_FACTOR_ONE_MINUS_SRC_COLOR", BlendFactor::OneMinusSrcColor),
    ("VK_BLEND_FACTOR_DST_COLOR", BlendFactor::DstColor),
    ("VK_BLEND_FACTOR_ONE_MINUS_DST_COLOR", BlendFactor::OneMinusDstColor),
    ("VK_BLEND_FACTOR_SRC_ALPHA", BlendFactor::SrcAlpha),
    ("VK_BLEND_FACTOR_ONE_MINUS_SRC_ALPHA", BlendFactor::OneMinusSrcAlpha),
    ("VK_BLEND_FACTOR_DST_ALPHA", BlendFactor::DstAlpha),
    ("VK_BLEND_FACTOR_ONE_MINUS_DST_ALPHA", BlendFactor::OneMinusDstAlpha),
    ("VK_BLEND_FACTOR_CONSTANT_COLOR", BlendFactor::ConstantColor),
    ("VK_BLEND_FACTOR_ONE_MINUS_CONSTANT_COLOR", BlendFactor::OneMinusConstantColor),
    ("VK_BLEND_FACTOR_CONSTANT_ALPHA", BlendFactor::ConstantAlpha),
    ("VK_BLEND_FACTOR_ONE_MINUS_CONSTANT_ALPHA", BlendFactor::OneMinusConstantAlpha),
    ("VK_BLEND_FACTOR_SRC_ALPHA_SATURATE", BlendFactor::SrcAlphaSaturate),
    ("VK_BLEND_FACTOR_SRC1_COLOR", BlendFactor::Src1Color),
    ("VK_BLEND_FACTOR_ONE_MINUS_SRC1_COLOR", BlendFactor::OneMinusSrc1Color),
    ("VK_BLEND_FACTOR_SRC1_ALPHA", BlendFactor::Src1Alpha),
    ("VK_BLEND_FACTOR_ONE_MINUS_SRC1_ALPHA", BlendFactor::OneMinusSrc1Alpha),
];

const BLEND_FACTORS: Table<BlendFactor> = &[
    ("zero", BlendFactor::Zero),
    ("one", BlendFactor::One),
    ("src_color", BlendFactor::SrcColor),
    ("one_minus_src_color", BlendFactor::OneMinusSrcColor),
    ("dst_color", BlendFactor::DstColor),
    ("one_minus_dst_color", BlendFactor::OneMinusDstColor),
    ("src_alpha", BlendFactor::SrcAlpha),
    ("one_minus_src_alpha", BlendFactor::OneMinusSrcAlpha),
    ("dst_alpha", BlendFactor::DstAlpha),
    ("one_minus_dst_alpha", BlendFactor::OneMinusDstAlpha),
    ("constant_color", BlendFactor::ConstantColor),
    ("one_minus_constant_color", BlendFactor::OneMinusConstantColor),
    ("constant_alpha", BlendFactor::ConstantAlpha),
    ("one_minus_constant_alpha", BlendFactor::OneMinusConstantAlpha),
    ("src_alpha_saturate", BlendFactor::SrcAlphaSaturate),
    ("src1_color", BlendFactor::Src1Color),
    ("one_minus_src1_color", BlendFactor::OneMinusSrc1Color),
    ("src1_alpha", BlendFactor::Src1Alpha),
    ("one_minus_src1_alpha", BlendFactor::OneMinusSrc1Alpha),
];

const VK_BLEND_OPS: Table<BlendOp> = &[
    ("VK_BLEND_OP_ADD", BlendOp::Add),
    ("VK_BLEND_OP_SUBTRACT", BlendOp::Subtract),
    ("VK_BLEND_OP_REVERSE_SUBTRACT", BlendOp::ReverseSubtract),
    ("VK_BLEND_OP_MIN", BlendOp::Min),
    ("VK_BLEND_OP_MAX", BlendOp::Max),
    ("VK_BLEND_OP_ZERO_EXT", BlendOp::Zero),
    ("VK_BLEND_OP_SRC_EXT", BlendOp::Src),
    ("VK_BLEND_OP_DST_EXT", BlendOp::Dst),
    ("VK_BLEND_OP_SRC_OVER_EXT", BlendOp::SrcOver),
    ("VK_BLEND_OP_DST_OVER_EXT", BlendOp::DstOver),
    ("VK_BLEND_OP_SRC_IN_EXT", BlendOp::SrcIn),
    ("VK_BLEND_OP_DST_IN_EXT", BlendOp::DstIn),
    ("VK_BLEND_OP_SRC_OUT_EXT", BlendOp::SrcOut),
    ("VK_BLEND_OP_DST_OUT_EXT", BlendOp::DstOut),
    ("VK_BLEND_OP_SRC_ATOP_EXT", BlendOp::SrcAtop),
    ("VK_BLEND_OP_DST_ATOP_EXT", BlendOp::DstAtop),
    ("VK_BLEND_OP_XOR_EXT", BlendOp::Xor),
    ("VK_BLEND_OP_MULTIPLY_EXT", BlendOp::Multiply),
    ("VK_BLEND_OP_SCREEN_EXT", BlendOp::Screen),
    ("VK_BLEND_OP_OVERLAY_EXT", BlendOp::Overlay),
    ("VK_BLEND_OP_DARKEN_EXT", BlendOp::Darken),
    ("VK_BLEND_OP_LIGHTEN_EXT", BlendOp::Lighten),
    ("VK_BLEND_OP_COLORDODGE_EXT", BlendOp::ColorDodge),
    ("VK_BLEND_OP_COLORBURN_EXT", BlendOp::ColorBurn),
    ("VK_BLEND_OP_HARDLIGHT_EXT", BlendOp::HardLight),
    ("VK_BLEND_OP_SOFTLIGHT_EXT", BlendOp::SoftLight),
    ("VK_BLEND_OP_DIFFERENCE_EXT", BlendOp::Difference),
    ("VK_BLEND_OP_EXCLUSION_EXT", BlendOp::Exclusion),
    ("VK_BLEND_OP_INVERT_EXT", BlendOp::Invert),
    ("VK_BLEND_OP_INVERT_RGB_EXT", BlendOp::InvertRgb),
    ("VK_BLEND_OP_LINEARDODGE_EXT", BlendOp::LinearDodge),
    ("VK_BLEND_OP_LINEARBURN_EXT", BlendOp::LinearBurn),
    ("VK_BLEND_OP_VIVIDLIGHT_EXT", BlendOp::VividLight),
    ("VK_BLEND_OP_LINEARLIGHT_EXT", BlendOp::LinearLight),
    ("VK_BLEND_OP_PINLIGHT_EXT", BlendOp::PinLight),
    ("VK_BLEND_OP_HARDMIX_EXT", BlendOp::HardMix),
    ("VK_BLEND_OP_HSL_HUE_EXT", BlendOp::HslHue),
    ("VK_BLEND_OP_HSL_SATURATION_EXT", BlendOp::HslSaturation),
    ("VK_BLEND_OP_HSL_COLOR_EXT", BlendOp::HslColor),
    ("VK_BLEND_OP_HSL_LUMINOSITY_EXT", BlendOp::HslLuminosity),
    ("VK_BLEND_OP_PLUS_EXT", BlendOp::Plus),
    ("VK_BLEND_OP_PLUS_CLAMPED_EXT", BlendOp::PlusClamped),
    ("VK_BLEND_OP_PLUS_CLAMPED_ALPHA_EXT", BlendOp::PlusClampedAlpha),
    ("VK_BLEND_OP_PLUS_DARKER_EXT", BlendOp::PlusDarker),
    ("VK_BLEND_OP_MINUS_EXT", BlendOp::Minus),
    ("VK_BLEND_OP_MINUS_CLAMPED_EXT", BlendOp::MinusClamped),
    ("VK_BLEND_OP_CONTRAST_EXT", BlendOp::Contrast),
    ("VK_BLEND_OP_INVERT_OVG_EXT", BlendOp::InvertOvg),
    ("VK_BLEND_OP_RED_EXT", BlendOp::Red),
    ("VK_BLEND_OP_GREEN_EXT", BlendOp::Green),
    ("VK_BLEND_OP_BLUE_EXT", BlendOp::Blue),
];

const BLEND_OPS: Table<BlendOp> = &[
    ("add", BlendOp::Add),
    ("subtract", BlendOp::Subtract),
    ("reverse_subtract", BlendOp::ReverseSubtract),
    ("min", BlendOp::Min),
    ("max", BlendOp::Max),
    ("zero", BlendOp::Zero),
    ("src", BlendOp::Src),
    ("dst", BlendOp::Dst),
    ("src_over", BlendOp::SrcOver),
    ("dst_over", BlendOp::DstOver),
    ("src_in", BlendOp::SrcIn),
    ("dst_in", BlendOp::DstIn),
    ("src_out", BlendOp::SrcOut),
    ("dst_out", BlendOp::DstOut),
    ("src_atop", BlendOp::SrcAtop),
    ("dst_atop", BlendOp::DstAtop),
    ("xor", BlendOp::Xor),
    ("multiply", BlendOp::Multiply),
    ("screen", BlendOp::Screen),
    ("overlay", BlendOp::Overlay),
    ("darken", BlendOp::Darken),
    ("lighten", BlendOp::Lighten),
    ("color_dodge", BlendOp::ColorDodge),
    ("color_burn", BlendOp::ColorBurn),
    ("hard_light", BlendOp::HardLight),
    ("soft_light", BlendOp::SoftLight),
    ("difference", BlendOp::Difference),
    ("exclusion", BlendOp::Exclusion),
    ("invert", BlendOp::Invert),
    ("invert_rgb", BlendOp::InvertRgb),
    ("linear_dodge", BlendOp::LinearDodge),
    ("linear_burn", BlendOp::LinearBurn),
    ("vivid_light", BlendOp::VividLight),
    ("linear_light", BlendOp::LinearLight),
    ("pin_light", BlendOp::PinLight),
    ("hard_mix", BlendOp::HardMix),
    ("hsl_hue", BlendOp::HslHue),
    ("hsl_saturation", BlendOp::HslSaturation),
    ("hsl_color", BlendOp::HslColor),
    ("hsl_luminosity", BlendOp::HslLuminosity),
    ("plus", BlendOp::Plus),
    ("plus_clamped", BlendOp::PlusClamped),
    ("plus_clamped_alpha", BlendOp::PlusClampedAlpha),
    ("plus_darker", BlendOp::PlusDarker),
    ("minus", BlendOp::Minus),
    ("minus_clamped", BlendOp::MinusClamped),
    ("contrast", BlendOp::Contrast),
    ("invert_ovg", BlendOp::InvertOvg),
    ("red", BlendOp::Red),
    ("green", BlendOp::Green),
    ("blue", BlendOp::Blue),
];

const VK_COMPARE_OPS: Table<CompareOp> = &[
    ("VK_COMPARE_OP_NEVER", CompareOp::Never),
    ("VK_COMPARE_OP_LESS", CompareOp::Less),
    ("VK_COMPARE_OP_EQUAL", CompareOp::Equal),
    ("VK_COMPARE_OP_LESS_OR_EQUAL", CompareOp::LessOrEqual),
    ("VK_COMPARE_OP_GREATER", CompareOp::Greater),
    ("VK_COMPARE_OP_NOT_EQUAL", CompareOp::NotEqual),
    ("VK_COMPARE_OP_GREATER_OR_EQUAL", CompareOp::GreaterOrEqual),
    ("VK_COMPARE_OP_ALWAYS", CompareOp::Always),
];

const COMPARE_OPS: Table<CompareOp> = &[
    ("never", CompareOp::Never),
    ("less", CompareOp::Less),
    ("equal", CompareOp::Equal),
    ("less_or_equal", CompareOp::LessOrEqual),
    ("greater", CompareOp::Greater),
    ("not_equal", CompareOp::NotEqual),
    ("greater_or_equal", CompareOp::GreaterOrEqual),
    ("always", CompareOp::Always),
];

const STENCIL_OPS: Table<StencilOp> = &[
    ("VK_STENCIL_OP_KEEP", StencilOp::Keep),
    ("VK_STENCIL_OP_ZERO", StencilOp::Zero),
    ("VK_STENCIL_OP_REPLACE", StencilOp::Replace),
    ("VK_STENCIL_OP_INCREMENT_AND_CLAMP", StencilOp::IncrementAndClamp),
    ("VK_STENCIL_OP_DECREMENT_AND_CLAMP", StencilOp::DecrementAndClamp),
    ("VK_STENCIL_OP_INVERT", StencilOp::Invert),
    ("VK_STENCIL_OP_INCREMENT_AND_WRAP", StencilOp::IncrementAndWrap),
    ("VK_STENCIL_OP_DECREMENT_AND_WRAP", StencilOp::DecrementAndWrap),
];

const COLOR_COMPONENTS: Table<u8> = &[
    ("VK_COLOR_COMPONENT_R_BIT", COLOR_MASK_R),
    ("VK_COLOR_COMPONENT_G_BIT", COLOR_MASK_G),
    ("VK_COLOR_COMPONENT_B_BIT", COLOR_MASK_B),
    ("VK_COLOR_COMPONENT_A_BIT", COLOR_MASK_A),
];

const FILTER_TYPES: Table<FilterType> = &[
    ("nearest", FilterType::Nearest),
    ("linear", FilterType::Linear),
];

const ADDRESS_MODES: Table<AddressMode> = &[
    ("repeat", AddressMode::Repeat),
    ("mirrored_repeat", AddressMode::MirroredRepeat),
    ("clamp_to_edge", AddressMode::ClampToEdge),
    ("clamp_to_border", AddressMode::ClampToBorder),
    ("mirror_clamp_to_edge", AddressMode::MirrorClampToEdge),
];

const BORDER_COLORS: Table<BorderColor> = &[
    ("float_transparent_black", BorderColor::FloatTransparentBlack),
    ("int_transparent_black", BorderColor::IntTransparentBlack),
    ("float_opaque_black", BorderColor::FloatOpaqueBlack),
    ("int_opaque_black", BorderColor::IntOpaqueBlack),
    ("float_opaque_white", BorderColor::FloatOpaqueWhite),
    ("int_opaque_white", BorderColor::IntOpaqueWhite),
];

/// Topology by OpenGL (`GL_TRIANGLES`) or short Vulkan (`TRIANGLE_LIST`) name.
pub fn topology(name: &str) -> Option<Topology> {
    lookup(TOPOLOGIES, name)
}

/// Topology by full Vulkan enumerant (`VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST`).
pub fn vk_topology(name: &str) -> Option<Topology> {
    lookup(VK_TOPOLOGIES, name)
}

/// `VK_POLYGON_MODE_*`.
pub fn polygon_mode(name: &str) -> Option<PolygonMode> {
    lookup(POLYGON_MODES, name)
}

/// One `VK_CULL_MODE_*` term of a `|`-combined mask.
pub fn cull_mode(name: &str) -> Option<CullMode> {
    lookup(CULL_MODES, name)
}

/// `VK_FRONT_FACE_*`.
pub fn front_face(name: &str) -> Option<FrontFace> {
    lookup(FRONT_FACES, name)
}

/// `VK_LOGIC_OP_*`.
pub fn logic_op(name: &str) -> Option<LogicOp> {
    lookup(LOGIC_OPS, name)
}

/// `VK_BLEND_FACTOR_*`.
pub fn vk_blend_factor(name: &str) -> Option<BlendFactor> {
    lookup(VK_BLEND_FACTORS, name)
}

/// Lower-case blend factor (`one_minus_src_alpha`).
pub fn blend_factor(name: &str) -> Option<BlendFactor> {
    lookup(BLEND_FACTORS, name)
}

/// `VK_BLEND_OP_*`, including the `_EXT` advanced ops.
pub fn vk_blend_op(name: &str) -> Option<BlendOp> {
    lookup(VK_BLEND_OPS, name)
}

/// Lower-case blend op (`src_over`).
pub fn blend_op(name: &str) -> Option<BlendOp> {
    lookup(BLEND_OPS, name)
}

/// `VK_COMPARE_OP_*`.
pub fn vk_compare_op(name: &str) -> Option<CompareOp> {
    lookup(VK_COMPARE_OPS, name)
}

/// Lower-case compare op (`less_or_equal`).
pub fn compare_op(name: &str) -> Option<CompareOp> {
    lookup(COMPARE_OPS, name)
}

/// `VK_STENCIL_OP_*`.
pub fn stencil_op(name: &str) -> Option<StencilOp> {
    lookup(STENCIL_OPS, name)
}

/// Mask bit for one `VK_COLOR_COMPONENT_*_BIT`.
pub fn color_component(name: &str) -> Option<u8> {
    lookup(COLOR_COMPONENTS, name)
}

/// `nearest` or `linear`.
pub fn filter_type(name: &str) -> Option<FilterType> {
    lookup(FILTER_TYPES, name)
}

/// Sampler address mode (`clamp_to_edge`).
pub fn address_mode(name: &str) -> Option<AddressMode> {
    lookup(ADDRESS_MODES, name)
}

/// Sampler border colour (`float_opaque_white`).
pub fn border_color(name: &str) -> Option<BorderColor> {
    lookup(BORDER_COLORS, name)
}

/// `true` or `false` in any case.
pub fn parse_boolean(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vkscript/names.rs"]
mod tests;
