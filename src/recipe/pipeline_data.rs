//! Fixed-function state of a graphics pipeline.

use serde::Serialize;

/// Primitive assembly mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Topology {
    Unknown,
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    #[default]
    TriangleStrip,
    TriangleFan,
    LineListWithAdjacency,
    LineStripWithAdjacency,
    TriangleListWithAdjacency,
    TriangleStripWithAdjacency,
    PatchList,
}

/// Rasterization fill mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
    Point,
}

/// Faces discarded before rasterization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum CullMode {
    #[default]
    None,
    Front,
    Back,
    FrontAndBack,
}

impl CullMode {
    /// Union of two masks.
    pub fn combine(self, other: CullMode) -> CullMode {
        match (self, other) {
            (a, CullMode::None) => a,
            (CullMode::None, b) => b,
            (CullMode::Front, CullMode::Front) => CullMode::Front,
            (CullMode::Back, CullMode::Back) => CullMode::Back,
            _ => CullMode::FrontAndBack,
        }
    }
}

/// Winding treated as front facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum FrontFace {
    #[default]
    CounterClockwise,
    Clockwise,
}

/// Depth and stencil comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum CompareOp {
    Unknown,
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    #[default]
    Always,
}

/// Stencil buffer update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum StencilOp {
    Unknown,
    #[default]
    Keep,
    Zero,
    Replace,
    IncrementAndClamp,
    DecrementAndClamp,
    Invert,
    IncrementAndWrap,
    DecrementAndWrap,
}

/// Framebuffer logic operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum LogicOp {
    #[default]
    Clear,
    And,
    AndReverse,
    Copy,
    AndInverted,
    NoOp,
    Xor,
    Or,
    Nor,
    Equivalent,
    Invert,
    OrReverse,
    CopyInverted,
    OrInverted,
    Nand,
    Set,
}

/// Colour blend equation, including the advanced blend modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BlendOp {
    Unknown,
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
    Zero,
    Src,
    Dst,
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcAtop,
    DstAtop,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Invert,
    InvertRgb,
    LinearDodge,
    LinearBurn,
    VividLight,
    LinearLight,
    PinLight,
    HardMix,
    HslHue,
    HslSaturation,
    HslColor,
    HslLuminosity,
    Plus,
    PlusClamped,
    PlusClampedAlpha,
    PlusDarker,
    Minus,
    MinusClamped,
    Contrast,
    InvertOvg,
    Red,
    Green,
    Blue,
}

/// Source or destination blend weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BlendFactor {
    Unknown,
    Zero,
    #[default]
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
    Src1Color,
    OneMinusSrc1Color,
    Src1Alpha,
    OneMinusSrc1Alpha,
}

/// Red channel bit of [`PipelineData::color_write_mask`].
pub const COLOR_MASK_R: u8 = 1;
/// Green channel bit of [`PipelineData::color_write_mask`].
pub const COLOR_MASK_G: u8 = 2;
/// Blue channel bit of [`PipelineData::color_write_mask`].
pub const COLOR_MASK_B: u8 = 4;
/// Alpha channel bit of [`PipelineData::color_write_mask`].
pub const COLOR_MASK_A: u8 = 8;

/// Viewport rectangle with its depth range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

/// Fixed-function pipeline state mutated by the test commands and snapshotted by draws.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct PipelineData {
    pub front_fail_op: StencilOp,
    pub front_pass_op: StencilOp,
    pub front_depth_fail_op: StencilOp,
    pub front_compare_op: CompareOp,
    pub back_fail_op: StencilOp,
    pub back_pass_op: StencilOp,
    pub back_depth_fail_op: StencilOp,
    pub back_compare_op: CompareOp,

    pub topology: Topology,
    pub polygon_mode: PolygonMode,
    pub cull_mode: CullMode,
    pub front_face: FrontFace,
    pub depth_compare_op: CompareOp,
    pub logic_op: LogicOp,

    pub src_color_blend_factor: BlendFactor,
    pub dst_color_blend_factor: BlendFactor,
    pub src_alpha_blend_factor: BlendFactor,
    pub dst_alpha_blend_factor: BlendFactor,
    pub color_blend_op: BlendOp,
    pub alpha_blend_op: BlendOp,

    pub front_compare_mask: u32,
    pub front_write_mask: u32,
    pub front_reference: u32,
    pub back_compare_mask: u32,
    pub back_write_mask: u32,
    pub back_reference: u32,

    /// Bitwise or of the `COLOR_MASK_*` constants.
    pub color_write_mask: u8,

    pub enable_blend: bool,
    pub enable_depth_test: bool,
    pub enable_depth_write: bool,
    pub enable_depth_clamp: bool,
    pub enable_depth_bias: bool,
    pub enable_depth_bounds_test: bool,
    pub enable_stencil_test: bool,
    pub enable_primitive_restart: bool,
    pub enable_rasterizer_discard: bool,
    pub enable_logic_op: bool,

    pub line_width: f32,
    pub depth_bias_constant_factor: f32,
    pub depth_bias_clamp: f32,
    pub depth_bias_slope_factor: f32,
    pub min_depth_bounds: f32,
    pub max_depth_bounds: f32,

    pub viewport: Option<Viewport>,
    pub patch_control_points: u32,
}

impl Default for PipelineData {
    fn default() -> Self {
        Self {
            front_fail_op: StencilOp::Keep,
            front_pass_op: StencilOp::Keep,
            front_depth_fail_op: StencilOp::Keep,
            front_compare_op: CompareOp::Always,
            back_fail_op: StencilOp::Keep,
            back_pass_op: StencilOp::Keep,
            back_depth_fail_op: StencilOp::Keep,
            back_compare_op: CompareOp::Always,
            topology: Topology::TriangleStrip,
            polygon_mode: PolygonMode::Fill,
            cull_mode: CullMode::None,
            front_face: FrontFace::CounterClockwise,
            depth_compare_op: CompareOp::Always,
            logic_op: LogicOp::Clear,
            src_color_blend_factor: BlendFactor::One,
            dst_color_blend_factor: BlendFactor::Zero,
            src_alpha_blend_factor: BlendFactor::One,
            dst_alpha_blend_factor: BlendFactor::Zero,
            color_blend_op: BlendOp::Add,
            alpha_blend_op: BlendOp::Add,
            front_compare_mask: u32::MAX,
            front_write_mask: u32::MAX,
            front_reference: 0,
            back_compare_mask: u32::MAX,
            back_write_mask: u32::MAX,
            back_reference: 0,
            color_write_mask: COLOR_MASK_R | COLOR_MASK_G | COLOR_MASK_B | COLOR_MASK_A,
            enable_blend: false,
            enable_depth_test: false,
            enable_depth_write: false,
            enable_depth_clamp: false,
            enable_depth_bias: false,
            enable_depth_bounds_test: false,
            enable_stencil_test: false,
            enable_primitive_restart: false,
            enable_rasterizer_discard: false,
            enable_logic_op: false,
            line_width: 1.0,
            depth_bias_constant_factor: 0.0,
            depth_bias_clamp: 0.0,
            depth_bias_slope_factor: 0.0,
            min_depth_bounds: 0.0,
            max_depth_bounds: 0.0,
            viewport: None,
            patch_control_points: 3,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/pipeline_data.rs"]
mod tests;
