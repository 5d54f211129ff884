//! Vulkan-style image format tags.

use serde::Serialize;

/// Named image format, when a type has one.
///
/// Matrices and other data-only types map to [`FormatType::Unknown`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[allow(non_camel_case_types, missing_docs)]
pub enum FormatType {
    /// No matching image format.
    #[default]
    Unknown,
    A1R5G5B5_UNORM_PACK16,
    A2B10G10R10_SINT_PACK32,
    A2B10G10R10_SNORM_PACK32,
    A2B10G10R10_SSCALED_PACK32,
    A2B10G10R10_UINT_PACK32,
    A2B10G10R10_UNORM_PACK32,
    A2B10G10R10_USCALED_PACK32,
    A2R10G10B10_SINT_PACK32,
    A2R10G10B10_SNORM_PACK32,
    A2R10G10B10_SSCALED_PACK32,
    A2R10G10B10_UINT_PACK32,
    A2R10G10B10_UNORM_PACK32,
    A2R10G10B10_USCALED_PACK32,
    A8B8G8R8_SINT_PACK32,
    A8B8G8R8_SNORM_PACK32,
    A8B8G8R8_SRGB_PACK32,
    A8B8G8R8_SSCALED_PACK32,
    A8B8G8R8_UINT_PACK32,
    A8B8G8R8_UNORM_PACK32,
    A8B8G8R8_USCALED_PACK32,
    B10G11R11_UFLOAT_PACK32,
    B4G4R4A4_UNORM_PACK16,
    B5G5R5A1_UNORM_PACK16,
    B5G6R5_UNORM_PACK16,
    B8G8R8A8_SINT,
    B8G8R8A8_SNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_SSCALED,
    B8G8R8A8_UINT,
    B8G8R8A8_UNORM,
    B8G8R8A8_USCALED,
    B8G8R8_SINT,
    B8G8R8_SNORM,
    B8G8R8_SRGB,
    B8G8R8_SSCALED,
    B8G8R8_UINT,
    B8G8R8_UNORM,
    B8G8R8_USCALED,
    D16_UNORM,
    D16_UNORM_S8_UINT,
    D24_UNORM_S8_UINT,
    D32_SFLOAT,
    D32_SFLOAT_S8_UINT,
    R16G16B16A16_SFLOAT,
    R16G16B16A16_SINT,
    R16G16B16A16_SNORM,
    R16G16B16A16_SSCALED,
    R16G16B16A16_UINT,
    R16G16B16A16_UNORM,
    R16G16B16A16_USCALED,
    R16G16B16_SFLOAT,
    R16G16B16_SINT,
    R16G16B16_SNORM,
    R16G16B16_SSCALED,
    R16G16B16_UINT,
    R16G16B16_UNORM,
    R16G16B16_USCALED,
    R16G16_SFLOAT,
    R16G16_SINT,
    R16G16_SNORM,
    R16G16_SSCALED,
    R16G16_UINT,
    R16G16_UNORM,
    R16G16_USCALED,
    R16_SFLOAT,
    R16_SINT,
    R16_SNORM,
    R16_SSCALED,
    R16_UINT,
    R16_UNORM,
    R16_USCALED,
    R32G32B32A32_SFLOAT,
    R32G32B32A32_SINT,
    R32G32B32A32_UINT,
    R32G32B32_SFLOAT,
    R32G32B32_SINT,
    R32G32B32_UINT,
    R32G32_SFLOAT,
    R32G32_SINT,
    R32G32_UINT,
    R32_SFLOAT,
    R32_SINT,
    R32_UINT,
    R4G4B4A4_UNORM_PACK16,
    R4G4_UNORM_PACK8,
    R5G5B5A1_UNORM_PACK16,
    R5G6B5_UNORM_PACK16,
    R64G64B64A64_SFLOAT,
    R64G64B64A64_SINT,
    R64G64B64A64_UINT,
    R64G64B64_SFLOAT,
    R64G64B64_SINT,
    R64G64B64_UINT,
    R64G64_SFLOAT,
    R64G64_SINT,
    R64G64_UINT,
    R64_SFLOAT,
    R64_SINT,
    R64_UINT,
    R8G8B8A8_SINT,
    R8G8B8A8_SNORM,
    R8G8B8A8_SRGB,
    R8G8B8A8_SSCALED,
    R8G8B8A8_UINT,
    R8G8B8A8_UNORM,
    R8G8B8A8_USCALED,
    R8G8B8_SINT,
    R8G8B8_SNORM,
    R8G8B8_SRGB,
    R8G8B8_SSCALED,
    R8G8B8_UINT,
    R8G8B8_UNORM,
    R8G8B8_USCALED,
    R8G8_SINT,
    R8G8_SNORM,
    R8G8_SRGB,
    R8G8_SSCALED,
    R8G8_UINT,
    R8G8_UNORM,
    R8G8_USCALED,
    R8_SINT,
    R8_SNORM,
    R8_SRGB,
    R8_SSCALED,
    R8_UINT,
    R8_UNORM,
    R8_USCALED,
    S8_UINT,
    X8_D24_UNORM_PACK32,
}

const FORMAT_TYPE_NAMES: &[(&str, FormatType)] = &[
    ("A1R5G5B5_UNORM_PACK16", FormatType::A1R5G5B5_UNORM_PACK16),
    ("A2B10G10R10_SINT_PACK32", FormatType::A2B10G10R10_SINT_PACK32),
    ("A2B10G10R10_SNORM_PACK32", FormatType::A2B10G10R10_SNORM_PACK32),
    ("A2B10G10R10_SSCALED_PACK32", FormatType::A2B10G10R10_SSCALED_PACK32),
    ("A2B10G10R10_UINT_PACK32", FormatType::A2B10G10R10_UINT_PACK32),
    ("A2B10G10R10_UNORM_PACK32", FormatType::A2B10G10R10_UNORM_PACK32),
    ("A2B10G10R10_USCALED_PACK32", FormatType::A2B10G10R10_USCALED_PACK32),
    ("A2R10G10B10_SINT_PACK32", FormatType::A2R10G10B10_SINT_PACK32),
    ("A2R10G10B10_SNORM_PACK32", FormatType::A2R10G10B10_SNORM_PACK32),
    ("A2R10G10B10_SSCALED_PACK32", FormatType::A2R10G10B10_SSCALED_PACK32),
    ("A2R10G10B10_UINT_PACK32", FormatType::A2R10G10B10_UINT_PACK32),
    ("A2R10G10B10_UNORM_PACK32", FormatType::A2R10G10B10_UNORM_PACK32),
    ("A2R10G10B10_USCALED_PACK32", FormatType::A2R10G10B10_USCALED_PACK32),
    ("A8B8G8R8_SINT_PACK32", FormatType::A8B8G8R8_SINT_PACK32),
    ("A8B8G8R8_SNORM_PACK32", FormatType::A8B8G8R8_SNORM_PACK32),
    ("A8B8G8R8_SRGB_PACK32", FormatType::A8B8G8R8_SRGB_PACK32),
    ("A8B8G8R8_SSCALED_PACK32", FormatType::A8B8G8R8_SSCALED_PACK32),
    ("A8B8G8R8_UINT_PACK32", FormatType::A8B8G8R8_UINT_PACK32),
    ("A8B8G8R8_UNORM_PACK32", FormatType::A8B8G8R8_UNORM_PACK32),
    ("A8B8G8R8_USCALED_PACK32", FormatType::A8B8G8R8_USCALED_PACK32),
    ("B10G11R11_UFLOAT_PACK32", FormatType::B10G11R11_UFLOAT_PACK32),
    ("B4G4R4A4_UNORM_PACK16", FormatType::B4G4R4A4_UNORM_PACK16),
    ("B5G5R5A1_UNORM_PACK16", FormatType::B5G5R5A1_UNORM_PACK16),
    ("B5G6R5_UNORM_PACK16", FormatType::B5G6R5_UNORM_PACK16),
    ("B8G8R8A8_SINT", FormatType::B8G8R8A8_SINT),
    ("B8G8R8A8_SNORM", FormatType::B8G8R8A8_SNORM),
    ("B8G8R8A8_SRGB", FormatType::B8G8R8A8_SRGB),
    ("B8G8R8A8_SSCALED", FormatType::B8G8R8A8_SSCALED),
    ("B8G8R8A8_UINT", FormatType::B8G8R8A8_UINT),
    ("B8G8R8A8_UNORM", FormatType::B8G8R8A8_UNORM),
    ("B8G8R8A8_USCALED", FormatType::B8G8R8A8_USCALED),
    ("B8G8R8_SINT", FormatType::B8G8R8_SINT),
    ("B8G8R8_SNORM", FormatType::B8G8R8_SNORM),
    ("B8G8R8_SRGB", FormatType::B8G8R8_SRGB),
    ("B8G8R8_SSCALED", FormatType::B8G8R8_SSCALED),
    ("B8G8R8_UINT", FormatType::B8G8R8_UINT),
    ("B8G8R8_UNORM", FormatType::B8G8R8_UNORM),
    ("B8G8R8_USCALED", FormatType::B8G8R8_USCALED),
    ("D16_UNORM", FormatType::D16_UNORM),
    ("D16_UNORM_S8_UINT", FormatType::D16_UNORM_S8_UINT),
    ("D24_UNORM_S8_UINT", FormatType::D24_UNORM_S8_UINT),
    ("D32_SFLOAT", FormatType::D32_SFLOAT),
    ("D32_SFLOAT_S8_UINT", FormatType::D32_SFLOAT_S8_UINT),
    ("R16G16B16A16_SFLOAT", FormatType::R16G16B16A16_SFLOAT),
    ("R16G16B16A16_SINT", FormatType::R16G16B16A16_SINT),
    ("R16G16B16A16_SNORM", FormatType::R16G16B16A16_SNORM),
    ("R16G16B16A16_SSCALED", FormatType::R16G16B16A16_SSCALED),
    ("R16G16B16A16_UINT", FormatType::R16G16B16A16_UINT),
    ("R16G16B16A16_UNORM", FormatType::R16G16B16A16_UNORM),
    ("R16G16B16A16_USCALED", FormatType::R16G16B16A16_USCALED),
    ("R16G16B16_SFLOAT", FormatType::R16G16B16_SFLOAT),
    ("R16G16B16_SINT", FormatType::R16G16B16_SINT),
    ("R16G16B16_SNORM", FormatType::R16G16B16_SNORM),
    ("R16G16B16_SSCALED", FormatType::R16G16B16_SSCALED),
    ("R16G16B16_UINT", FormatType::R16G16B16_UINT),
    ("R16G16B16_UNORM", FormatType::R16G16B16_UNORM),
    ("R16G16B16_USCALED", FormatType::R16G16B16_USCALED),
    ("R16G16_SFLOAT", FormatType::R16G16_SFLOAT),
    ("R16G16_SINT", FormatType::R16G16_SINT),
    ("R16G16_SNORM", FormatType::R16G16_SNORM),
    ("R16G16_SSCALED", FormatType::R16G16_SSCALED),
    ("R16G16_UINT", FormatType::R16G16_UINT),
    ("R16G16_UNORM", FormatType::R16G16_UNORM),
    ("R16G16_USCALED", FormatType::R16G16_USCALED),
    ("R16_SFLOAT", FormatType::R16_SFLOAT),
    ("R16_SINT", FormatType::R16_SINT),
    ("R16_SNORM", FormatType::R16_SNORM),
    ("R16_SSCALED", FormatType::R16_SSCALED),
    ("R16_UINT", FormatType::R16_UINT),
    ("R16_UNORM", FormatType::R16_UNORM),
    ("R16_USCALED", FormatType::R16_USCALED),
    ("R32G32B32A32_SFLOAT", FormatType::R32G32B32A32_SFLOAT),
    ("R32G32B32A32_SINT", FormatType::R32G32B32A32_SINT),
    ("R32G32B32A32_UINT", FormatType::R32G32B32A32_UINT),
    ("R32G32B32_SFLOAT", FormatType::R32G32B32_SFLOAT),
    ("R32G32B32_SINT", FormatType::R32G32B32_SINT),
    ("R32G32B32_UINT", FormatType::R32G32B32_UINT),
    ("R32G32_SFLOAT", FormatType::R32G32_SFLOAT),
    ("R32G32_SINT", FormatType::R32G32_SINT),
    ("R32G32_UINT", FormatType::R32G32_UINT),
    ("R32_SFLOAT", FormatType::R32_SFLOAT),
    ("R32_SINT", FormatType::R32_SINT),
    ("R32_UINT", FormatType::R32_UINT),
    ("R4G4B4A4_UNORM_PACK16", FormatType::R4G4B4A4_UNORM_PACK16),
    ("R4G4_UNORM_PACK8", FormatType::R4G4_UNORM_PACK8),
    ("R5G5B5A1_UNORM_PACK16", FormatType::R5G5B5A1_UNORM_PACK16),
    ("R5G6B5_UNORM_PACK16", FormatType::R5G6B5_UNORM_PACK16),
    ("R64G64B64A64_SFLOAT", FormatType::R64G64B64A64_SFLOAT),
    ("R64G64B64A64_SINT", FormatType::R64G64B64A64_SINT),
    ("R64G64B64A64_UINT", FormatType::R64G64B64A64_UINT),
    ("R64G64B64_SFLOAT", FormatType::R64G64B64_SFLOAT),
    ("R64G64B64_SINT", FormatType::R64G64B64_SINT),
    ("R64G64B64_UINT", FormatType::R64G64B64_UINT),
    ("R64G64_SFLOAT", FormatType::R64G64_SFLOAT),
    ("R64G64_SINT", FormatType::R64G64_SINT),
    ("R64G64_UINT", FormatType::R64G64_UINT),
    ("R64_SFLOAT", FormatType::R64_SFLOAT),
    ("R64_SINT", FormatType::R64_SINT),
    ("R64_UINT", FormatType::R64_UINT),
    ("R8G8B8A8_SINT", FormatType::R8G8B8A8_SINT),
    ("R8G8B8A8_SNORM", FormatType::R8G8B8A8_SNORM),
    ("R8G8B8A8_SRGB", FormatType::R8G8B8A8_SRGB),
    ("R8G8B8A8_SSCALED", FormatType::R8G8B8A8_SSCALED),
    ("R8G8B8A8_UINT", FormatType::R8G8B8A8_UINT),
    ("R8G8B8A8_UNORM", FormatType::R8G8B8A8_UNORM),
    ("R8G8B8A8_USCALED", FormatType::R8G8B8A8_USCALED),
    ("R8G8B8_SINT", FormatType::R8G8B8_SINT),
    ("R8G8B8_SNORM", FormatType::R8G8B8_SNORM),
    ("R8G8B8_SRGB", FormatType::R8G8B8_SRGB),
    ("R8G8B8_SSCALED", FormatType::R8G8B8_SSCALED),
    ("R8G8B8_UINT", FormatType::R8G8B8_UINT),
    ("R8G8B8_UNORM", FormatType::R8G8B8_UNORM),
    ("R8G8B8_USCALED", FormatType::R8G8B8_USCALED),
    ("R8G8_SINT", FormatType::R8G8_SINT),
    ("R8G8_SNORM", FormatType::R8G8_SNORM),
    ("R8G8_SRGB", FormatType::R8G8_SRGB),
    ("R8G8_SSCALED", FormatType::R8G8_SSCALED),
    ("R8G8_UINT", FormatType::R8G8_UINT),
    ("R8G8_UNORM", FormatType::R8G8_UNORM),
    ("R8G8_USCALED", FormatType::R8G8_USCALED),
    ("R8_SINT", FormatType::R8_SINT),
    ("R8_SNORM", FormatType::R8_SNORM),
    ("R8_SRGB", FormatType::R8_SRGB),
    ("R8_SSCALED", FormatType::R8_SSCALED),
    ("R8_UINT", FormatType::R8_UINT),
    ("R8_UNORM", FormatType::R8_UNORM),
    ("R8_USCALED", FormatType::R8_USCALED),
    ("S8_UINT", FormatType::S8_UINT),
    ("X8_D24_UNORM_PACK32", FormatType::X8_D24_UNORM_PACK32),
];

impl FormatType {
    /// Look up a format by its exact Vulkan name (without the `VK_FORMAT_` prefix).
    pub fn from_name(name: &str) -> Self {
        FORMAT_TYPE_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(Self::Unknown, |(_, t)| *t)
    }

    /// Canonical name, or `None` for [`FormatType::Unknown`].
    pub fn name(self) -> Option<&'static str> {
        FORMAT_TYPE_NAMES
            .iter()
            .find(|(_, t)| *t == self)
            .map(|(n, _)| *n)
    }

    /// True for formats with a stencil aspect.
    pub fn has_stencil_component(self) -> bool {
        matches!(
            self,
            Self::D24_UNORM_S8_UINT
                | Self::D16_UNORM_S8_UINT
                | Self::D32_SFLOAT_S8_UINT
                | Self::S8_UINT
        )
    }

    /// True for formats with a depth aspect.
    pub fn has_depth_component(self) -> bool {
        matches!(
            self,
            Self::D16_UNORM
                | Self::D16_UNORM_S8_UINT
                | Self::D24_UNORM_S8_UINT
                | Self::D32_SFLOAT
                | Self::D32_SFLOAT_S8_UINT
                | Self::X8_D24_UNORM_PACK32
        )
    }
}
