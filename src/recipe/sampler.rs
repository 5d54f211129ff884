use serde::Serialize;

use crate::recipe::pipeline_data::CompareOp;

/// Texel filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum FilterType {
    #[default]
    Nearest,
    Linear,
}

/// Behaviour of texture coordinates outside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AddressMode {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
    MirrorClampToEdge,
}

/// Colour returned for clamp-to-border lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BorderColor {
    #[default]
    FloatTransparentBlack,
    IntTransparentBlack,
    FloatOpaqueBlack,
    IntOpaqueBlack,
    FloatOpaqueWhite,
    IntOpaqueWhite,
}

/// Named sampler state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Sampler {
    pub name: String,
    pub mag_filter: FilterType,
    pub min_filter: FilterType,
    pub mipmap_mode: FilterType,
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub address_mode_w: AddressMode,
    pub border_color: BorderColor,
    pub min_lod: f32,
    pub max_lod: f32,
    pub normalized_coords: bool,
    pub compare_enable: bool,
    pub compare_op: CompareOp,
}

impl Default for Sampler {
    fn default() -> Self {
        Self {
            name: String::new(),
            mag_filter: FilterType::Nearest,
            min_filter: FilterType::Nearest,
            mipmap_mode: FilterType::Nearest,
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            address_mode_w: AddressMode::Repeat,
            border_color: BorderColor::FloatTransparentBlack,
            min_lod: 0.0,
            max_lod: 1.0,
            normalized_coords: true,
            compare_enable: false,
            compare_op: CompareOp::Never,
        }
    }
}

impl Sampler {
    /// Default sampler called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the u, v and w address modes together.
    pub fn set_address_mode(&mut self, mode: AddressMode) {
        self.address_mode_u = mode;
        self.address_mode_v = mode;
        self.address_mode_w = mode;
    }
}
