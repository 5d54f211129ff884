//! Ray-tracing acceleration structures, shader groups and shader binding tables.

use serde::Serialize;

use crate::foundation::error::{RecipeError, RecipeResult};
use crate::foundation::ids::{BlasId, ShaderId};

/// Primitive kind of a [`Geometry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    /// Three vertices per primitive.
    Triangle,
    /// Axis-aligned box given by its min and max corners.
    Aabb,
}

/// Vertex data for one bottom-level geometry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Geometry {
    /// Primitive kind.
    pub geometry_type: GeometryType,
    /// Flat xyz coordinates.
    pub data: Vec<f32>,
}

impl Geometry {
    /// Geometry of `geometry_type` over `data`.
    pub fn new(geometry_type: GeometryType, data: Vec<f32>) -> Self {
        Self {
            geometry_type,
            data,
        }
    }

    /// Vertices described by the data, three floats each.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / 3
    }

    /// Triangles or boxes described by the data.
    pub fn primitive_count(&self) -> usize {
        match self.geometry_type {
            GeometryType::Triangle => self.vertex_count() / 3,
            GeometryType::Aabb => self.vertex_count() / 2,
        }
    }
}

/// Bottom-level acceleration structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Blas {
    /// Unique name within the script.
    pub name: String,
    /// Geometries in declaration order.
    pub geometries: Vec<Geometry>,
}

impl Blas {
    /// Empty BLAS called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometries: Vec::new(),
        }
    }
}

const MAX_24_BITS: u32 = (1 << 24) - 1;
const MAX_8_BITS: u32 = (1 << 8) - 1;

fn check_width(what: &str, value: u32, max: u32, bits: u32) -> RecipeResult<u32> {
    if value > max {
        return Err(RecipeError::validation(format!(
            "{what} must fit in {bits} bits, got: {value}"
        )));
    }
    Ok(value)
}

/// Placement of a BLAS inside a TLAS.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlasInstance {
    blas_name: String,
    blas: Option<BlasId>,
    transform: Vec<f32>,
    instance_index: u32,
    mask: u32,
    offset: u32,
    flags: u32,
}

impl Default for BlasInstance {
    fn default() -> Self {
        Self {
            blas_name: String::new(),
            blas: None,
            transform: Vec::new(),
            instance_index: 0,
            mask: 0xFF,
            offset: 0,
            flags: 0,
        }
    }
}

impl BlasInstance {
    /// Point the instance at a BLAS.
    pub fn set_used_blas(&mut self, name: impl Into<String>, blas: BlasId) {
        self.blas_name = name.into();
        self.blas = Some(blas);
    }

    /// Name of the instanced BLAS.
    pub fn used_blas_name(&self) -> &str {
        &self.blas_name
    }

    /// Id of the instanced BLAS, once resolved.
    pub fn used_blas(&self) -> Option<BlasId> {
        self.blas
    }

    /// Row-major 3x4 transform, or empty for identity.
    pub fn set_transform(&mut self, transform: Vec<f32>) -> RecipeResult<()> {
        if !transform.is_empty() && transform.len() != 12 {
            return Err(RecipeError::validation(format!(
                "transform must have 12 values, got: {}",
                transform.len()
            )));
        }
        self.transform = transform;
        Ok(())
    }

    /// Transform values.
    pub fn transform(&self) -> &[f32] {
        &self.transform
    }

    /// 24-bit custom index visible to shaders.
    pub fn set_instance_index(&mut self, index: u32) -> RecipeResult<()> {
        self.instance_index = check_width("instance custom index", index, MAX_24_BITS, 24)?;
        Ok(())
    }

    /// Custom index.
    pub fn instance_index(&self) -> u32 {
        self.instance_index
    }

    /// 8-bit visibility mask.
    pub fn set_mask(&mut self, mask: u32) -> RecipeResult<()> {
        self.mask = check_width("instance mask", mask, MAX_8_BITS, 8)?;
        Ok(())
    }

    /// Visibility mask.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// 24-bit shader binding table record offset.
    pub fn set_offset(&mut self, offset: u32) -> RecipeResult<()> {
        self.offset = check_width("instance SBT record offset", offset, MAX_24_BITS, 24)?;
        Ok(())
    }

    /// SBT record offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// 8-bit instance flags.
    pub fn set_flags(&mut self, flags: u32) -> RecipeResult<()> {
        self.flags = check_width("instance flags", flags, MAX_8_BITS, 8)?;
        Ok(())
    }

    /// Instance flags.
    pub fn flags(&self) -> u32 {
        self.flags
    }
}

/// Top-level acceleration structure.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Tlas {
    /// Unique name within the script.
    pub name: String,
    /// Instances in declaration order.
    pub instances: Vec<BlasInstance>,
}

impl Tlas {
    /// Empty TLAS called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instances: Vec::new(),
        }
    }
}

/// Ray-tracing shader group.
///
/// A group is either *general* (one ray-gen, miss or callable shader) or a *hit* group
/// built from any subset of closest-hit, any-hit and intersection shaders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct ShaderGroup {
    pub name: String,
    pub general: Option<ShaderId>,
    pub closest_hit: Option<ShaderId>,
    pub any_hit: Option<ShaderId>,
    pub intersection: Option<ShaderId>,
}

impl ShaderGroup {
    /// Empty group called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when a general shader is set.
    pub fn is_general_group(&self) -> bool {
        self.general.is_some()
    }

    /// True when any hit-stage shader is set.
    pub fn is_hit_group(&self) -> bool {
        self.closest_hit.is_some() || self.any_hit.is_some() || self.intersection.is_some()
    }

    /// Every shader the group references.
    pub fn shaders(&self) -> impl Iterator<Item = ShaderId> + '_ {
        [self.general, self.closest_hit, self.any_hit, self.intersection]
            .into_iter()
            .flatten()
    }
}

/// One record of a shader binding table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SbtRecord {
    /// Shader group the record points at.
    pub shader_group: String,
    /// Number of consecutive slots the record fills.
    pub count: u32,
    /// Index of the group inside a library pipeline, `u32::MAX` for the owning pipeline.
    pub pipeline_index: u32,
}

impl SbtRecord {
    /// Single-slot record for `shader_group`.
    pub fn new(shader_group: impl Into<String>) -> Self {
        Self {
            shader_group: shader_group.into(),
            count: 1,
            pipeline_index: u32::MAX,
        }
    }
}

/// Named shader binding table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Sbt {
    /// Unique name within its pipeline.
    pub name: String,
    /// Records in slot order.
    pub records: Vec<SbtRecord>,
}

impl Sbt {
    /// Empty table called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Total slots over all records.
    pub fn size(&self) -> u32 {
        self.records.iter().map(|r| r.count).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/acceleration.rs"]
mod tests;
