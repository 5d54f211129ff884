use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::format::Format;
use crate::data::type_parser::parse_format;
use crate::foundation::arena::Arena;
use crate::foundation::error::{RecipeError, RecipeResult};
use crate::foundation::ids::{BufferId, SamplerId, ShaderId, TlasId};
use crate::foundation::value::Value;
use crate::recipe::acceleration::{Sbt, ShaderGroup};
use crate::recipe::buffer::{Buffer, BufferType, InputRate};
use crate::recipe::pipeline_data::PipelineData;
use crate::recipe::sampler::{AddressMode, FilterType, Sampler};
use crate::recipe::shader::{Shader, ShaderFormat, ShaderType};

/// Name of the generated color attachment.
pub const GENERATED_COLOR_BUFFER: &str = "framebuffer";
/// Name of the generated depth/stencil attachment.
pub const GENERATED_DEPTH_BUFFER: &str = "depth_buffer";
/// Name of the generated push-constant buffer.
pub const GENERATED_PUSH_CONSTANT_BUFFER: &str = "push_constant_buffer";

const DEFAULT_COLOR_BUFFER_FORMAT: &str = "B8G8R8A8_UNORM";
const DEFAULT_DEPTH_BUFFER_FORMAT: &str = "D32_SFLOAT_S8_UINT";
const DEFAULT_FRAMEBUFFER_SIZE: u32 = 250;

// Literal sampler mask bits, as laid out by the OpenCL headers.
const CL_NORMALIZED_COORDS_BIT: u32 = 0x1;
const CL_ADDRESS_MODE_BITS: u32 = 0xe;
const CL_ADDRESS_NONE: u32 = 0x0;
const CL_ADDRESS_CLAMP_TO_EDGE: u32 = 0x2;
const CL_ADDRESS_CLAMP: u32 = 0x4;
const CL_ADDRESS_REPEAT: u32 = 0x6;
const CL_ADDRESS_MIRRORED_REPEAT: u32 = 0x8;
const CL_FILTER_NEAREST_BIT: u32 = 0x10;
const CL_FILTER_LINEAR_BIT: u32 = 0x20;

const UNBOUND: u32 = u32::MAX;

/// Kind of work a pipeline performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PipelineType {
    Graphics,
    Compute,
    RayTracing,
}

/// Validation state. A failed validation is final.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PipelineState {
    #[default]
    Draft,
    Valid,
    Invalid,
}

/// Subgroup size policy requested for a shader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "policy", content = "size", rename_all = "snake_case")]
pub enum RequiredSubgroupSize {
    /// Driver default.
    #[default]
    NotSet,
    /// Exact power-of-two size.
    Specific(u32),
    /// Smallest supported size.
    Minimum,
    /// Largest supported size.
    Maximum,
}

/// Binding class of a kernel argument in a descriptor map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DescriptorKind {
    #[default]
    Unknown,
    Ssbo,
    Ubo,
    Pod,
    PodUbo,
    PodPushConstant,
    RoImage,
    WoImage,
    Sampler,
}

impl DescriptorKind {
    fn is_pod(self) -> bool {
        matches!(self, Self::Pod | Self::PodUbo | Self::PodPushConstant)
    }
}

/// Where one kernel argument lives.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct DescriptorMapEntry {
    pub arg_name: String,
    pub kind: DescriptorKind,
    pub descriptor_set: u32,
    pub binding: u32,
    pub arg_ordinal: u32,
    pub pod_offset: u32,
    pub pod_arg_size: u32,
}

/// Value a kernel push constant is filled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum PushConstantType {
    Dimensions,
    GlobalOffset,
    RegionOffset,
}

/// Push-constant range generated for a kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct PushConstant {
    pub push_constant_type: PushConstantType,
    pub offset: u32,
    pub size: u32,
}

/// A shader attached to a pipeline, with its per-pipeline settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineShaderInfo {
    shader: ShaderId,
    shader_name: String,
    shader_format: ShaderFormat,
    shader_type: ShaderType,
    entry_point: String,
    optimizations: Vec<String>,
    required_subgroup_size: RequiredSubgroupSize,
    /// Extra compiler flags.
    pub compile_options: Vec<String>,
    /// Allow the subgroup size to vary.
    pub varying_subgroup_size: bool,
    /// Require full subgroups.
    pub require_full_subgroups: bool,
    /// Emit debug information when compiling.
    pub emit_debug_info: bool,
    /// Specialization constants by id.
    pub specialization: BTreeMap<u32, u32>,
    /// Compiled SPIR-V words, filled in by the consumer.
    pub data: Vec<u32>,
    /// OpenCL kernel argument layout by kernel name.
    pub descriptor_map: BTreeMap<String, Vec<DescriptorMapEntry>>,
    /// OpenCL generated push constants.
    pub push_constants: Vec<PushConstant>,
}

impl PipelineShaderInfo {
    fn new(id: ShaderId, shader: &Shader, stage: ShaderType) -> Self {
        Self {
            shader: id,
            shader_name: shader.name().to_owned(),
            shader_format: shader.format(),
            shader_type: stage,
            entry_point: "main".to_owned(),
            optimizations: Vec::new(),
            required_subgroup_size: RequiredSubgroupSize::NotSet,
            compile_options: Vec::new(),
            varying_subgroup_size: false,
            require_full_subgroups: false,
            emit_debug_info: false,
            specialization: BTreeMap::new(),
            data: Vec::new(),
            descriptor_map: BTreeMap::new(),
            push_constants: Vec::new(),
        }
    }

    /// Attached shader.
    pub fn shader(&self) -> ShaderId {
        self.shader
    }

    /// Name of the attached shader.
    pub fn shader_name(&self) -> &str {
        &self.shader_name
    }

    /// Source encoding of the attached shader.
    pub fn shader_format(&self) -> ShaderFormat {
        self.shader_format
    }

    /// Stage the shader is bound to.
    pub fn shader_type(&self) -> ShaderType {
        self.shader_type
    }

    /// Entry point, `main` unless overridden.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Optimizer passes.
    pub fn optimizations(&self) -> &[String] {
        &self.optimizations
    }

    /// Subgroup size policy.
    pub fn required_subgroup_size(&self) -> RequiredSubgroupSize {
        self.required_subgroup_size
    }
}

/// A buffer bound to a pipeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct BufferInfo {
    pub buffer: BufferId,
    pub buffer_type: BufferType,
    pub descriptor_set: u32,
    pub binding: u32,
    pub location: u32,
    pub base_mip_level: u32,
    pub dynamic_offset: u32,
    pub arg_name: String,
    pub arg_no: u32,
    pub input_rate: InputRate,
    pub format: Option<Format>,
    pub offset: u32,
    pub stride: u32,
    pub sampler: Option<SamplerId>,
    pub descriptor_offset: u64,
    /// `u64::MAX` binds the whole buffer.
    pub descriptor_range: u64,
}

impl BufferInfo {
    /// Binding of `buffer` as `buffer_type` at set 0, binding 0.
    pub fn new(buffer: BufferId, buffer_type: BufferType) -> Self {
        Self {
            buffer,
            buffer_type,
            descriptor_set: 0,
            binding: 0,
            location: 0,
            base_mip_level: 0,
            dynamic_offset: 0,
            arg_name: String::new(),
            arg_no: UNBOUND,
            input_rate: InputRate::Vertex,
            format: None,
            offset: 0,
            stride: 0,
            sampler: None,
            descriptor_offset: 0,
            descriptor_range: u64::MAX,
        }
    }

    /// Same binding placed at `descriptor_set`/`binding`.
    pub fn at(mut self, descriptor_set: u32, binding: u32) -> Self {
        self.descriptor_set = descriptor_set;
        self.binding = binding;
        self
    }

    /// Same binding with a sampler attached.
    pub fn with_sampler(mut self, sampler: Option<SamplerId>) -> Self {
        self.sampler = sampler;
        self
    }

    fn is_unbound(&self) -> bool {
        self.descriptor_set == UNBOUND && self.binding == UNBOUND
    }
}

/// A sampler bound to a pipeline, or an OpenCL literal sampler still to be generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct SamplerInfo {
    pub sampler: Option<SamplerId>,
    pub descriptor_set: u32,
    pub binding: u32,
    pub arg_name: String,
    pub arg_no: u32,
    /// OpenCL literal sampler bits, `u32::MAX` for script samplers.
    pub mask: u32,
}

/// A TLAS bound to a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct TlasInfo {
    pub tlas: TlasId,
    pub descriptor_set: u32,
    pub binding: u32,
}

/// Scalar kernel argument given by a `SET` command.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ArgSetInfo {
    pub name: String,
    pub ordinal: u32,
    pub format: Format,
    pub value: Value,
}

/// A graphics, compute or ray-tracing pipeline and everything bound to it.
///
/// Buffers, samplers and shaders are owned by the script; the pipeline keeps ids. Operations
/// that size or fill buffers take the script's buffer arena.
#[derive(Clone, Debug, Serialize)]
pub struct Pipeline {
    name: String,
    pipeline_type: PipelineType,
    state: PipelineState,
    shaders: Vec<PipelineShaderInfo>,
    color_attachments: Vec<BufferInfo>,
    resolve_targets: Vec<BufferInfo>,
    vertex_buffers: Vec<BufferInfo>,
    buffers: Vec<BufferInfo>,
    samplers: Vec<SamplerInfo>,
    tlases: Vec<TlasInfo>,
    depth_stencil_buffer: Option<BufferInfo>,
    index_buffer: Option<BufferId>,
    push_constant_buffer: Option<BufferInfo>,
    fb_width: u32,
    fb_height: u32,
    pipeline_data: PipelineData,
    set_arg_values: Vec<ArgSetInfo>,
    pod_buffers: BTreeMap<(u32, u32), BufferId>,
    literal_samplers: Vec<SamplerId>,
    shader_groups: Vec<ShaderGroup>,
    sbts: Vec<Sbt>,
    /// Ray payload size in bytes.
    pub max_ray_payload_size: u32,
    /// Hit attribute size in bytes.
    pub max_ray_hit_attribute_size: u32,
    /// Maximum trace recursion.
    pub max_ray_recursion_depth: u32,
    /// Raw pipeline creation flags.
    pub create_flags: u32,
}

fn buffer_mut(buffers: &mut Arena<BufferId, Buffer>, id: BufferId) -> RecipeResult<&mut Buffer> {
    buffers
        .get_mut(id)
        .ok_or_else(|| RecipeError::validation(format!("unknown buffer id {}", id.0)))
}

fn buffer_ref(buffers: &Arena<BufferId, Buffer>, id: BufferId) -> RecipeResult<&Buffer> {
    buffers
        .get(id)
        .ok_or_else(|| RecipeError::validation(format!("unknown buffer id {}", id.0)))
}

// Width, height and texel count of a framebuffer attachment at `mip_level`.
fn attachment_extent(width: u32, height: u32, mip_level: u32) -> RecipeResult<(u32, u32, u32)> {
    let too_large = || {
        RecipeError::validation(format!(
            "framebuffer {width}x{height} at mip level {mip_level} is too large"
        ))
    };
    let scaled = |v: u32| {
        v.checked_shl(mip_level)
            .filter(|s| s >> mip_level == v)
            .ok_or_else(too_large)
    };
    let (w, h) = (scaled(width)?, scaled(height)?);
    let count = w.checked_mul(h).ok_or_else(too_large)?;
    Ok((w, h, count))
}

fn generated_buffer(name: &str, format_name: &str, buffer_type: BufferType) -> RecipeResult<Buffer> {
    let format = parse_format(format_name)
        .ok_or_else(|| RecipeError::codec(format!("Invalid type provided: {format_name}")))?;
    let mut buf = Buffer::with_format(name, format);
    buf.set_buffer_type(buffer_type);
    Ok(buf)
}

impl Pipeline {
    /// Empty pipeline with a 250x250 framebuffer.
    pub fn new(name: impl Into<String>, pipeline_type: PipelineType) -> Self {
        Self {
            name: name.into(),
            pipeline_type,
            state: PipelineState::Draft,
            shaders: Vec::new(),
            color_attachments: Vec::new(),
            resolve_targets: Vec::new(),
            vertex_buffers: Vec::new(),
            buffers: Vec::new(),
            samplers: Vec::new(),
            tlases: Vec::new(),
            depth_stencil_buffer: None,
            index_buffer: None,
            push_constant_buffer: None,
            fb_width: DEFAULT_FRAMEBUFFER_SIZE,
            fb_height: DEFAULT_FRAMEBUFFER_SIZE,
            pipeline_data: PipelineData::default(),
            set_arg_values: Vec::new(),
            pod_buffers: BTreeMap::new(),
            literal_samplers: Vec::new(),
            shader_groups: Vec::new(),
            sbts: Vec::new(),
            max_ray_payload_size: 0,
            max_ray_hit_attribute_size: 0,
            max_ray_recursion_depth: 1,
            create_flags: 0,
        }
    }

    /// Unique name within the script.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of pipeline.
    pub fn pipeline_type(&self) -> PipelineType {
        self.pipeline_type
    }

    /// True for graphics pipelines.
    pub fn is_graphics(&self) -> bool {
        self.pipeline_type == PipelineType::Graphics
    }

    /// True for compute pipelines.
    pub fn is_compute(&self) -> bool {
        self.pipeline_type == PipelineType::Compute
    }

    /// True for ray-tracing pipelines.
    pub fn is_ray_tracing(&self) -> bool {
        self.pipeline_type == PipelineType::RayTracing
    }

    /// Result of the last [`Pipeline::validate`].
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Attached shaders in attachment order.
    pub fn shaders(&self) -> &[PipelineShaderInfo] {
        &self.shaders
    }

    /// Settings of the shader called `name`.
    pub fn shader(&self, name: &str) -> Option<&PipelineShaderInfo> {
        self.shaders.iter().find(|info| info.shader_name == name)
    }

    /// Mutable settings of the shader called `name`.
    pub fn shader_mut(&mut self, name: &str) -> Option<&mut PipelineShaderInfo> {
        self.shaders.iter_mut().find(|info| info.shader_name == name)
    }

    /// Color attachments in binding order.
    pub fn color_attachments(&self) -> &[BufferInfo] {
        &self.color_attachments
    }

    /// Multisample resolve targets.
    pub fn resolve_targets(&self) -> &[BufferInfo] {
        &self.resolve_targets
    }

    /// Vertex buffers.
    pub fn vertex_buffers(&self) -> &[BufferInfo] {
        &self.vertex_buffers
    }

    /// Descriptor buffers.
    pub fn buffers(&self) -> &[BufferInfo] {
        &self.buffers
    }

    /// Bound samplers.
    pub fn samplers(&self) -> &[SamplerInfo] {
        &self.samplers
    }

    /// Bound acceleration structures.
    pub fn tlases(&self) -> &[TlasInfo] {
        &self.tlases
    }

    /// Depth/stencil attachment.
    pub fn depth_stencil_buffer(&self) -> Option<&BufferInfo> {
        self.depth_stencil_buffer.as_ref()
    }

    /// Index buffer.
    pub fn index_buffer(&self) -> Option<BufferId> {
        self.index_buffer
    }

    /// Push-constant buffer.
    pub fn push_constant_buffer(&self) -> Option<&BufferInfo> {
        self.push_constant_buffer.as_ref()
    }

    /// Framebuffer width in pixels.
    pub fn framebuffer_width(&self) -> u32 {
        self.fb_width
    }

    /// Framebuffer height in pixels.
    pub fn framebuffer_height(&self) -> u32 {
        self.fb_height
    }

    /// Change the framebuffer size. Attachments follow on [`Pipeline::update_framebuffer_sizes`].
    pub fn set_framebuffer_size(&mut self, width: u32, height: u32) {
        self.fb_width = width;
        self.fb_height = height;
    }

    /// Fixed-function state.
    pub fn pipeline_data(&self) -> &PipelineData {
        &self.pipeline_data
    }

    /// Mutable fixed-function state.
    pub fn pipeline_data_mut(&mut self) -> &mut PipelineData {
        &mut self.pipeline_data
    }

    /// Replace the fixed-function state.
    pub fn set_pipeline_data(&mut self, data: PipelineData) {
        self.pipeline_data = data;
    }

    /// Ray-tracing shader groups.
    pub fn shader_groups(&self) -> &[ShaderGroup] {
        &self.shader_groups
    }

    /// Shader binding tables.
    pub fn sbts(&self) -> &[Sbt] {
        &self.sbts
    }

    /// Kernel arguments given by `SET` commands.
    pub fn set_arg_values(&self) -> &[ArgSetInfo] {
        &self.set_arg_values
    }

    /// Samplers generated from OpenCL literal masks.
    pub fn literal_samplers(&self) -> &[SamplerId] {
        &self.literal_samplers
    }

    /// Attach `shader` as `stage`.
    ///
    /// Graphics and compute pipelines hold one shader per stage: a second shader for a stage
    /// replaces the first. Ray-tracing pipelines keep every shader.
    pub fn add_shader(&mut self, id: ShaderId, shader: &Shader, stage: ShaderType) -> RecipeResult<()> {
        match self.pipeline_type {
            PipelineType::Compute if stage != ShaderType::Compute => {
                return Err(RecipeError::validation(
                    "only compute shaders allowed in a compute pipeline",
                ));
            }
            PipelineType::Graphics if stage == ShaderType::Compute => {
                return Err(RecipeError::validation(
                    "can not add a compute shader to a graphics pipeline",
                ));
            }
            PipelineType::Graphics if stage.is_ray_tracing() => {
                return Err(RecipeError::validation(
                    "can not add a ray tracing shader to a graphics pipeline",
                ));
            }
            PipelineType::RayTracing if !stage.is_ray_tracing() => {
                return Err(RecipeError::validation(
                    "only ray tracing shaders allowed in a ray tracing pipeline",
                ));
            }
            _ => {}
        }

        if self.shaders.iter().any(|info| info.shader == id) {
            return Err(RecipeError::validation(
                "can not add duplicate shader to pipeline",
            ));
        }

        if !self.is_ray_tracing()
            && let Some(info) = self.shaders.iter_mut().find(|info| info.shader_type == stage)
        {
            info.shader = id;
            info.shader_name = shader.name().to_owned();
            info.shader_format = shader.format();
            return Ok(());
        }

        self.shaders.push(PipelineShaderInfo::new(id, shader, stage));
        Ok(())
    }

    fn shader_info_mut(&mut self, shader: &str, what: &str) -> RecipeResult<&mut PipelineShaderInfo> {
        self.shaders
            .iter_mut()
            .find(|info| info.shader_name == shader)
            .ok_or_else(|| {
                RecipeError::validation(format!("unknown shader specified for {what}: {shader}"))
            })
    }

    /// Override the entry point of `shader`. Only the default `main` may be overridden.
    pub fn set_shader_entry_point(&mut self, shader: &str, name: &str) -> RecipeResult<()> {
        if name.is_empty() {
            return Err(RecipeError::validation("entry point should not be blank"));
        }
        let info = self.shader_info_mut(shader, "entry point")?;
        if info.entry_point != "main" {
            return Err(RecipeError::validation(
                "multiple entry points given for the same shader",
            ));
        }
        info.entry_point = name.to_owned();
        Ok(())
    }

    /// Optimizer passes for `shader`; each pass may appear once.
    pub fn set_shader_optimizations(&mut self, shader: &str, opts: &[String]) -> RecipeResult<()> {
        for (i, opt) in opts.iter().enumerate() {
            if opts[..i].contains(opt) {
                return Err(RecipeError::validation(format!(
                    "duplicate optimization flag ({opt}) set on shader"
                )));
            }
        }
        self.shader_info_mut(shader, "optimizations")?.optimizations = opts.to_vec();
        Ok(())
    }

    /// Compiler flags for `shader`.
    pub fn set_shader_compile_options(&mut self, shader: &str, opts: &[String]) -> RecipeResult<()> {
        self.shader_info_mut(shader, "compile options")?.compile_options = opts.to_vec();
        Ok(())
    }

    /// Require an exact subgroup size: a power of two in `1..=128`.
    pub fn set_shader_required_subgroup_size(&mut self, shader: &str, size: u32) -> RecipeResult<()> {
        if !(1..=128).contains(&size) || !size.is_power_of_two() {
            return Err(RecipeError::validation(format!(
                "invalid required subgroup size {size} specified for shader name {shader}"
            )));
        }
        self.set_required_subgroup_size(shader, RequiredSubgroupSize::Specific(size))
    }

    /// Require the smallest supported subgroup size.
    pub fn set_shader_required_subgroup_size_to_minimum(&mut self, shader: &str) -> RecipeResult<()> {
        self.set_required_subgroup_size(shader, RequiredSubgroupSize::Minimum)
    }

    /// Require the largest supported subgroup size.
    pub fn set_shader_required_subgroup_size_to_maximum(&mut self, shader: &str) -> RecipeResult<()> {
        self.set_required_subgroup_size(shader, RequiredSubgroupSize::Maximum)
    }

    fn set_required_subgroup_size(&mut self, shader: &str, policy: RequiredSubgroupSize) -> RecipeResult<()> {
        self.shader_info_mut(shader, "required subgroup size")?
            .required_subgroup_size = policy;
        Ok(())
    }

    /// Allow a varying subgroup size for `shader`.
    pub fn set_shader_varying_subgroup_size(&mut self, shader: &str, value: bool) -> RecipeResult<()> {
        self.shader_info_mut(shader, "varying subgroup size")?
            .varying_subgroup_size = value;
        Ok(())
    }

    /// Require full subgroups for `shader`.
    pub fn set_shader_require_full_subgroups(&mut self, shader: &str, value: bool) -> RecipeResult<()> {
        self.shader_info_mut(shader, "require full subgroups")?
            .require_full_subgroups = value;
        Ok(())
    }

    /// Record a kernel argument location for an OpenCL `shader`.
    pub fn add_descriptor_entry(
        &mut self,
        shader: &str,
        kernel: &str,
        entry: DescriptorMapEntry,
    ) -> RecipeResult<()> {
        self.shader_info_mut(shader, "descriptor map")?
            .descriptor_map
            .entry(kernel.to_owned())
            .or_default()
            .push(entry);
        Ok(())
    }

    /// Record a generated push constant for an OpenCL `shader`.
    pub fn add_push_constant(&mut self, shader: &str, push_constant: PushConstant) -> RecipeResult<()> {
        self.shader_info_mut(shader, "push constants")?
            .push_constants
            .push(push_constant);
        Ok(())
    }

    /// Bind a color attachment at `location`; the buffer is sized to the framebuffer.
    pub fn add_color_attachment(
        &mut self,
        buffers: &mut Arena<BufferId, Buffer>,
        buffer: BufferId,
        location: u32,
        base_mip_level: u32,
    ) -> RecipeResult<()> {
        for attachment in &self.color_attachments {
            if attachment.location == location {
                return Err(RecipeError::validation(
                    "can not bind two color buffers to the same LOCATION",
                ));
            }
            if attachment.buffer == buffer {
                return Err(RecipeError::validation(
                    "color buffer may only be bound to a PIPELINE once",
                ));
            }
        }

        let (width, height, count) =
            attachment_extent(self.fb_width, self.fb_height, base_mip_level)?;
        let buf = buffer_mut(buffers, buffer)?;
        buf.width = width;
        buf.height = height;
        buf.set_element_count(count);

        let mut info = BufferInfo::new(buffer, BufferType::Color);
        info.location = location;
        info.base_mip_level = base_mip_level;
        self.color_attachments.push(info);
        Ok(())
    }

    /// Location `buffer` is bound to as a color attachment.
    pub fn get_location_for_color_attachment(&self, buffer: BufferId) -> RecipeResult<u32> {
        self.color_attachments
            .iter()
            .find(|info| info.buffer == buffer)
            .map(|info| info.location)
            .ok_or_else(|| RecipeError::validation("Unable to find requested buffer"))
    }

    /// Bind a multisample resolve target sized to the framebuffer.
    pub fn add_resolve_target(
        &mut self,
        buffers: &mut Arena<BufferId, Buffer>,
        buffer: BufferId,
    ) -> RecipeResult<()> {
        let (width, height, count) = attachment_extent(self.fb_width, self.fb_height, 0)?;
        let buf = buffer_mut(buffers, buffer)?;
        buf.width = width;
        buf.height = height;
        buf.set_element_count(count);
        self.resolve_targets
            .push(BufferInfo::new(buffer, BufferType::Resolve));
        Ok(())
    }

    /// Bind the single depth/stencil attachment.
    pub fn set_depth_stencil_buffer(
        &mut self,
        buffers: &mut Arena<BufferId, Buffer>,
        buffer: BufferId,
    ) -> RecipeResult<()> {
        if self.depth_stencil_buffer.is_some() {
            return Err(RecipeError::validation(
                "can only bind one depth/stencil buffer in a PIPELINE",
            ));
        }
        let (width, height, count) = attachment_extent(self.fb_width, self.fb_height, 0)?;
        let buf = buffer_mut(buffers, buffer)?;
        buf.width = width;
        buf.height = height;
        buf.set_element_count(count);
        self.depth_stencil_buffer = Some(BufferInfo::new(buffer, BufferType::DepthStencil));
        Ok(())
    }

    /// Bind the single index buffer.
    pub fn set_index_buffer(&mut self, buffer: BufferId) -> RecipeResult<()> {
        if self.index_buffer.is_some() {
            return Err(RecipeError::validation(
                "can only bind one INDEX_DATA buffer in a pipeline",
            ));
        }
        self.index_buffer = Some(buffer);
        Ok(())
    }

    /// Bind a vertex buffer at `location`.
    pub fn add_vertex_buffer(
        &mut self,
        buffer: BufferId,
        location: u32,
        input_rate: InputRate,
        format: Option<Format>,
        offset: u32,
        stride: u32,
    ) -> RecipeResult<()> {
        if self.vertex_buffers.iter().any(|v| v.location == location) {
            return Err(RecipeError::validation(
                "can not bind two vertex buffers to the same LOCATION",
            ));
        }
        let mut info = BufferInfo::new(buffer, BufferType::Vertex);
        info.location = location;
        info.input_rate = input_rate;
        info.format = format;
        info.offset = offset;
        info.stride = stride;
        self.vertex_buffers.push(info);
        Ok(())
    }

    /// Bind the single push-constant buffer.
    pub fn set_push_constant_buffer(&mut self, buffer: BufferId) -> RecipeResult<()> {
        if self.push_constant_buffer.is_some() {
            return Err(RecipeError::validation(
                "can only bind one push constant buffer in a PIPELINE",
            ));
        }
        self.push_constant_buffer = Some(BufferInfo::new(buffer, BufferType::PushConstant));
        Ok(())
    }

    fn create_push_constant_buffer(
        &mut self,
        buffers: &mut Arena<BufferId, Buffer>,
    ) -> RecipeResult<BufferId> {
        if self.push_constant_buffer.is_some() {
            return Err(RecipeError::validation(
                "can only bind one push constant buffer in a PIPELINE",
            ));
        }
        let buf = generated_buffer(
            GENERATED_PUSH_CONSTANT_BUFFER,
            "R8_UINT",
            BufferType::PushConstant,
        )?;
        let id = buffers.push(buf);
        tracing::debug!(pipeline = %self.name, "generated push constant buffer");
        self.push_constant_buffer = Some(BufferInfo::new(id, BufferType::PushConstant));
        Ok(id)
    }

    /// New `B8G8R8A8_UNORM` color buffer named [`GENERATED_COLOR_BUFFER`].
    pub fn generate_default_color_attachment_buffer() -> RecipeResult<Buffer> {
        generated_buffer(
            GENERATED_COLOR_BUFFER,
            DEFAULT_COLOR_BUFFER_FORMAT,
            BufferType::Color,
        )
    }

    /// New `D32_SFLOAT_S8_UINT` depth buffer named [`GENERATED_DEPTH_BUFFER`].
    pub fn generate_default_depth_stencil_attachment_buffer() -> RecipeResult<Buffer> {
        generated_buffer(
            GENERATED_DEPTH_BUFFER,
            DEFAULT_DEPTH_BUFFER_FORMAT,
            BufferType::DepthStencil,
        )
    }

    /// Buffer bound at `descriptor_set`/`binding`, if any.
    pub fn get_buffer_for_binding(&self, descriptor_set: u32, binding: u32) -> Option<BufferId> {
        self.buffers
            .iter()
            .find(|info| info.descriptor_set == descriptor_set && info.binding == binding)
            .map(|info| info.buffer)
    }

    /// Bind a descriptor buffer at the slot recorded in `info`.
    pub fn add_buffer(&mut self, info: BufferInfo) {
        self.buffers.push(info);
    }

    /// Bind `buffer` to the kernel argument called `arg_name`, replacing an earlier binding.
    pub fn add_buffer_by_arg_name(&mut self, buffer: BufferId, buffer_type: BufferType, arg_name: &str) {
        if let Some(info) = self.buffers.iter_mut().find(|info| info.arg_name == arg_name) {
            info.buffer = buffer;
            return;
        }
        let mut info = BufferInfo::new(buffer, buffer_type).at(UNBOUND, UNBOUND);
        info.arg_name = arg_name.to_owned();
        info.arg_no = UNBOUND;
        self.buffers.push(info);
    }

    /// Bind `buffer` to kernel argument number `arg_no`, replacing an earlier binding.
    pub fn add_buffer_by_arg_no(&mut self, buffer: BufferId, buffer_type: BufferType, arg_no: u32) {
        if let Some(info) = self.buffers.iter_mut().find(|info| info.arg_no == arg_no) {
            info.buffer = buffer;
            return;
        }
        let mut info = BufferInfo::new(buffer, buffer_type).at(UNBOUND, UNBOUND);
        info.arg_no = arg_no;
        self.buffers.push(info);
    }

    /// Drop every buffer bound at `descriptor_set`/`binding`.
    pub fn clear_buffers(&mut self, descriptor_set: u32, binding: u32) {
        self.buffers
            .retain(|info| !(info.descriptor_set == descriptor_set && info.binding == binding));
    }

    /// Bind `sampler` at `descriptor_set`/`binding`.
    pub fn add_sampler(&mut self, sampler: SamplerId, descriptor_set: u32, binding: u32) {
        self.samplers.push(SamplerInfo {
            sampler: Some(sampler),
            descriptor_set,
            binding,
            arg_name: String::new(),
            arg_no: UNBOUND,
            mask: UNBOUND,
        });
    }

    /// Bind `sampler` to the kernel argument called `arg_name`.
    pub fn add_sampler_by_arg_name(&mut self, sampler: SamplerId, arg_name: &str) {
        if let Some(info) = self.samplers.iter_mut().find(|info| info.arg_name == arg_name) {
            info.sampler = Some(sampler);
            return;
        }
        self.samplers.push(SamplerInfo {
            sampler: Some(sampler),
            descriptor_set: UNBOUND,
            binding: UNBOUND,
            arg_name: arg_name.to_owned(),
            arg_no: UNBOUND,
            mask: UNBOUND,
        });
    }

    /// Bind `sampler` to kernel argument number `arg_no`.
    pub fn add_sampler_by_arg_no(&mut self, sampler: SamplerId, arg_no: u32) {
        if let Some(info) = self.samplers.iter_mut().find(|info| info.arg_no == arg_no) {
            info.sampler = Some(sampler);
            return;
        }
        self.samplers.push(SamplerInfo {
            sampler: Some(sampler),
            descriptor_set: UNBOUND,
            binding: UNBOUND,
            arg_name: String::new(),
            arg_no,
            mask: UNBOUND,
        });
    }

    /// Reserve `descriptor_set`/`binding` for an OpenCL literal sampler described by `mask`.
    pub fn add_literal_sampler(&mut self, mask: u32, descriptor_set: u32, binding: u32) {
        self.samplers.push(SamplerInfo {
            sampler: None,
            descriptor_set,
            binding,
            arg_name: String::new(),
            arg_no: UNBOUND,
            mask,
        });
    }

    /// Drop every sampler bound at `descriptor_set`/`binding`.
    pub fn clear_samplers(&mut self, descriptor_set: u32, binding: u32) {
        self.samplers
            .retain(|info| !(info.descriptor_set == descriptor_set && info.binding == binding));
    }

    /// Bind a TLAS at `descriptor_set`/`binding`.
    pub fn add_tlas(&mut self, tlas: TlasId, descriptor_set: u32, binding: u32) {
        self.tlases.push(TlasInfo {
            tlas,
            descriptor_set,
            binding,
        });
    }

    /// Add a ray-tracing shader group; names are unique per pipeline.
    pub fn add_shader_group(&mut self, group: ShaderGroup) -> RecipeResult<()> {
        if self.shader_groups.iter().any(|g| g.name == group.name) {
            return Err(RecipeError::validation(format!(
                "duplicate shader group name provided: {}",
                group.name
            )));
        }
        self.shader_groups.push(group);
        Ok(())
    }

    /// Position of the group called `name`.
    pub fn shader_group_index(&self, name: &str) -> Option<u32> {
        self.shader_groups
            .iter()
            .position(|g| g.name == name)
            .map(|i| i as u32)
    }

    /// Add a shader binding table; names are unique per pipeline.
    pub fn add_sbt(&mut self, sbt: Sbt) -> RecipeResult<()> {
        if self.sbts.iter().any(|s| s.name == sbt.name) {
            return Err(RecipeError::validation(format!(
                "duplicate SBT name provided: {}",
                sbt.name
            )));
        }
        self.sbts.push(sbt);
        Ok(())
    }

    /// Record a kernel argument value for [`Pipeline::generate_opencl_pod_buffers`].
    pub fn set_arg(&mut self, arg: ArgSetInfo) {
        self.set_arg_values.push(arg);
    }

    /// Check the pipeline is complete.
    ///
    /// A failure moves the pipeline to [`PipelineState::Invalid`] and later calls fail
    /// without checking again.
    #[tracing::instrument(skip_all, fields(pipeline = %self.name))]
    pub fn validate(&mut self, buffers: &Arena<BufferId, Buffer>) -> RecipeResult<()> {
        if self.state == PipelineState::Invalid {
            return Err(RecipeError::validation(format!(
                "pipeline {} failed validation",
                self.name
            )));
        }
        match self.check(buffers) {
            Ok(()) => {
                self.state = PipelineState::Valid;
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "pipeline invalid");
                self.state = PipelineState::Invalid;
                Err(err)
            }
        }
    }

    fn check(&self, buffers: &Arena<BufferId, Buffer>) -> RecipeResult<()> {
        for attachment in &self.color_attachments {
            let buf = buffer_ref(buffers, attachment.buffer)?;
            let (_, _, expected) =
                attachment_extent(self.fb_width, self.fb_height, attachment.base_mip_level)?;
            if buf.element_count() != expected {
                return Err(RecipeError::validation(
                    "shared framebuffer must have same size over all PIPELINES",
                ));
            }
        }

        if let Some(depth) = &self.depth_stencil_buffer {
            let buf = buffer_ref(buffers, depth.buffer)?;
            let (_, _, expected) = attachment_extent(self.fb_width, self.fb_height, 0)?;
            if buf.element_count() != expected {
                return Err(RecipeError::validation(
                    "shared depth buffer must have same size over all PIPELINES",
                ));
            }
        }

        for info in &self.buffers {
            if buffer_ref(buffers, info.buffer)?.format().is_none() {
                return Err(RecipeError::validation(format!(
                    "buffer ({}:{}) requires a format",
                    info.descriptor_set, info.binding
                )));
            }
        }

        match self.pipeline_type {
            PipelineType::Graphics => self.check_graphics(buffers),
            PipelineType::Compute => self.check_compute(),
            PipelineType::RayTracing => self.check_ray_tracing(),
        }
    }

    fn has_stage(&self, stage: ShaderType) -> bool {
        self.shaders.iter().any(|info| info.shader_type == stage)
    }

    fn check_graphics(&self, buffers: &Arena<BufferId, Buffer>) -> RecipeResult<()> {
        if self.color_attachments.is_empty() {
            return Err(RecipeError::validation("PIPELINE missing color attachment"));
        }
        if !self.has_stage(ShaderType::Vertex) {
            return Err(RecipeError::validation(
                "graphics pipeline requires a vertex shader",
            ));
        }
        if !self.has_stage(ShaderType::Fragment) {
            return Err(RecipeError::validation(
                "graphics pipeline requires a fragment shader",
            ));
        }

        for attachment in &self.color_attachments {
            let buf = buffer_ref(buffers, attachment.buffer)?;
            let mut width = buf.width;
            let mut height = buf.height;
            for level in 1..buf.mip_levels {
                width >>= 1;
                if width == 0 {
                    return Err(RecipeError::validation(format!(
                        "color attachment with {} mip levels would have zero width for level {level}",
                        buf.mip_levels
                    )));
                }
                height >>= 1;
                if height == 0 {
                    return Err(RecipeError::validation(format!(
                        "color attachment with {} mip levels would have zero height for level {level}",
                        buf.mip_levels
                    )));
                }
            }
        }
        Ok(())
    }

    fn check_compute(&self) -> RecipeResult<()> {
        if self.shaders.is_empty() {
            return Err(RecipeError::validation(
                "compute pipeline requires a compute shader",
            ));
        }
        Ok(())
    }

    fn check_ray_tracing(&self) -> RecipeResult<()> {
        if !self.has_stage(ShaderType::RayGeneration) {
            return Err(RecipeError::validation(
                "ray tracing pipeline requires a ray generation shader",
            ));
        }
        if self.shader_groups.is_empty() {
            return Err(RecipeError::validation(
                "ray tracing pipeline requires at least one shader group",
            ));
        }

        let stage_of = |id: ShaderId| {
            self.shaders
                .iter()
                .find(|info| info.shader == id)
                .map(|info| info.shader_type)
        };
        for group in &self.shader_groups {
            match (group.is_general_group(), group.is_hit_group()) {
                (true, true) => {
                    return Err(RecipeError::validation(format!(
                        "shader group {} can not be both a general and a hit group",
                        group.name
                    )));
                }
                (false, false) => {
                    return Err(RecipeError::validation(format!(
                        "shader group {} has no shaders",
                        group.name
                    )));
                }
                _ => {}
            }

            let slots: [(Option<ShaderId>, &str, fn(ShaderType) -> bool); 4] = [
                (group.general, "general", ShaderType::is_general),
                (group.closest_hit, "closest hit", |s| s == ShaderType::ClosestHit),
                (group.any_hit, "any hit", |s| s == ShaderType::AnyHit),
                (group.intersection, "intersection", |s| s == ShaderType::Intersection),
            ];
            for (slot, what, accepts) in slots {
                let Some(id) = slot else { continue };
                let stage = stage_of(id).ok_or_else(|| {
                    RecipeError::validation(format!(
                        "shader group {} references a shader not attached to the pipeline",
                        group.name
                    ))
                })?;
                if !accepts(stage) {
                    return Err(RecipeError::validation(format!(
                        "shader group {} has a {what} shader of the wrong stage",
                        group.name
                    )));
                }
            }
        }

        for sbt in &self.sbts {
            for record in &sbt.records {
                if record.pipeline_index == UNBOUND
                    && self.shader_group_index(&record.shader_group).is_none()
                {
                    return Err(RecipeError::validation(format!(
                        "SBT {} references unknown shader group {}",
                        sbt.name, record.shader_group
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resize color and depth attachments to the current framebuffer size.
    pub fn update_framebuffer_sizes(&mut self, buffers: &mut Arena<BufferId, Buffer>) -> RecipeResult<()> {
        let (_, _, size) = attachment_extent(self.fb_width, self.fb_height, 0)?;
        if size == 0 {
            return Ok(());
        }

        for attachment in &self.color_attachments {
            let (width, height, count) =
                attachment_extent(self.fb_width, self.fb_height, attachment.base_mip_level)?;
            let buf = buffer_mut(buffers, attachment.buffer)?;
            buf.width = width;
            buf.height = height;
            buf.set_element_count(count);
        }

        if let Some(depth) = &self.depth_stencil_buffer {
            let buf = buffer_mut(buffers, depth.buffer)?;
            buf.width = self.fb_width;
            buf.height = self.fb_height;
            buf.set_element_count(size);
        }
        Ok(())
    }

    // First shader of an OpenCL compute pipeline, with the descriptor map of its entry point.
    fn opencl_kernel(&self) -> Option<(&PipelineShaderInfo, Option<&[DescriptorMapEntry]>)> {
        let info = self.shaders.first()?;
        if !self.is_compute() || info.shader_format != ShaderFormat::OpenClC {
            return None;
        }
        let entries = info
            .descriptor_map
            .get(&info.entry_point)
            .map(Vec::as_slice);
        Some((info, entries))
    }

    /// Resolve kernel-argument bindings to descriptor slots using the descriptor map.
    #[tracing::instrument(skip_all, fields(pipeline = %self.name))]
    pub fn update_opencl_buffer_bindings(&mut self, buffers: &Arena<BufferId, Buffer>) -> RecipeResult<()> {
        let Some((_, Some(entries))) = self.opencl_kernel() else {
            return Ok(());
        };
        let entries = entries.to_vec();

        for info in self.samplers.iter_mut().filter(|info| {
            info.descriptor_set == UNBOUND && info.binding == UNBOUND
        }) {
            for entry in &entries {
                if entry.arg_name == info.arg_name || entry.arg_ordinal == info.arg_no {
                    if entry.kind != DescriptorKind::Sampler {
                        return Err(RecipeError::validation(
                            "Sampler bound to non-sampler kernel arg",
                        ));
                    }
                    info.descriptor_set = entry.descriptor_set;
                    info.binding = entry.binding;
                }
            }
        }

        for info in self.buffers.iter_mut().filter(|info| info.is_unbound()) {
            for entry in &entries {
                if entry.arg_name != info.arg_name && entry.arg_ordinal != info.arg_no {
                    continue;
                }
                let name = buffers
                    .get(info.buffer)
                    .map(|b| b.name().to_owned())
                    .unwrap_or_default();
                let kind_mismatch = |what: &str| {
                    RecipeError::validation(format!("Buffer {name} must be a {what} binding"))
                };
                match info.buffer_type {
                    BufferType::Unknown => {
                        info.buffer_type = match entry.kind {
                            DescriptorKind::Ubo | DescriptorKind::PodUbo => BufferType::Uniform,
                            DescriptorKind::Ssbo | DescriptorKind::Pod => BufferType::Storage,
                            DescriptorKind::RoImage => BufferType::SampledImage,
                            DescriptorKind::WoImage => BufferType::StorageImage,
                            _ => {
                                return Err(RecipeError::validation(
                                    "Unhandled buffer type for OPENCL-C shader",
                                ));
                            }
                        };
                    }
                    BufferType::Uniform => {
                        if !matches!(entry.kind, DescriptorKind::Ubo | DescriptorKind::PodUbo) {
                            return Err(kind_mismatch("uniform"));
                        }
                    }
                    BufferType::Storage => {
                        if !matches!(entry.kind, DescriptorKind::Ssbo | DescriptorKind::Pod) {
                            return Err(kind_mismatch("storage"));
                        }
                    }
                    BufferType::SampledImage => {
                        if entry.kind != DescriptorKind::RoImage {
                            return Err(kind_mismatch("read-only image"));
                        }
                    }
                    BufferType::StorageImage => {
                        if entry.kind != DescriptorKind::WoImage {
                            return Err(kind_mismatch("write-only image"));
                        }
                    }
                    _ => {
                        return Err(RecipeError::validation(
                            "Unhandled buffer type for OPENCL-C shader",
                        ));
                    }
                }
                info.descriptor_set = entry.descriptor_set;
                info.binding = entry.binding;
            }
        }
        Ok(())
    }

    /// Turn `SET` kernel arguments into PoD buffers filled with the argument bytes.
    ///
    /// One buffer is created per descriptor slot and pushed into `buffers`; push-constant
    /// arguments land in the push-constant buffer.
    #[tracing::instrument(skip_all, fields(pipeline = %self.name))]
    pub fn generate_opencl_pod_buffers(&mut self, buffers: &mut Arena<BufferId, Buffer>) -> RecipeResult<()> {
        let Some((info, Some(entries))) = self.opencl_kernel() else {
            return Ok(());
        };
        let kernel = info.entry_point.clone();
        let entries = entries.to_vec();
        let args = self.set_arg_values.clone();

        for arg in &args {
            let uses_name = !arg.name.is_empty();
            let describe = |prefix: &str| {
                if uses_name {
                    format!("{prefix}: kernel {kernel}, name {}", arg.name)
                } else {
                    format!("{prefix}: kernel {kernel}, number {}", arg.ordinal)
                }
            };

            let entry = entries.iter().find(|e| {
                e.kind.is_pod()
                    && if uses_name {
                        e.arg_name == arg.name
                    } else {
                        e.arg_ordinal == arg.ordinal
                    }
            });
            let kind = entry.map_or(DescriptorKind::Pod, |e| e.kind);
            let (offset, arg_size) = entry.map_or((0, 0), |e| (e.pod_offset, e.pod_arg_size));

            let buffer = if kind == DescriptorKind::PodPushConstant {
                match &self.push_constant_buffer {
                    Some(pc) => pc.buffer,
                    None => self.create_push_constant_buffer(buffers)?,
                }
            } else {
                let Some(entry) = entry else {
                    return Err(RecipeError::validation(describe(
                        "could not find descriptor map entry for SET command",
                    )));
                };
                let slot = (entry.descriptor_set, entry.binding);
                let buffer = match self.pod_buffers.get(&slot) {
                    Some(id) => *id,
                    None => self.create_pod_buffer(buffers, slot, kind)?,
                };

                let buf = buffer_mut(buffers, buffer)?;
                if buf.value_count() < offset + arg_size {
                    buf.set_size_in_elements(offset + arg_size)?;
                }
                if arg_size != arg.format.size_in_bytes() {
                    return Err(RecipeError::validation(describe(
                        "SET command uses incorrect data size",
                    )));
                }
                buffer
            };

            let data = arg_bytes(arg);
            buffer_mut(buffers, buffer)?.set_data_with_offset(&data, offset)?;
        }
        Ok(())
    }

    fn create_pod_buffer(
        &mut self,
        buffers: &mut Arena<BufferId, Buffer>,
        (descriptor_set, binding): (u32, u32),
        kind: DescriptorKind,
    ) -> RecipeResult<BufferId> {
        if let Some(existing) = self
            .buffers
            .iter()
            .find(|info| info.descriptor_set == descriptor_set && info.binding == binding)
        {
            let name = buffers
                .get(existing.buffer)
                .map(|b| b.name().to_owned())
                .unwrap_or_default();
            return Err(RecipeError::validation(format!(
                "previously bound buffer {name} to PoD args at descriptor set {descriptor_set} binding {binding}"
            )));
        }

        let buffer_type = if kind == DescriptorKind::Pod {
            BufferType::Storage
        } else {
            BufferType::Uniform
        };
        // Descriptor map offsets are in bytes, so the buffer is byte-typed.
        let buf = generated_buffer(
            &format!("{}_pod_buffer_{descriptor_set}_{binding}", self.name),
            "R8_UINT",
            buffer_type,
        )?;
        let id = buffers.push(buf);
        tracing::debug!(descriptor_set, binding, "generated PoD buffer");

        self.pod_buffers.insert((descriptor_set, binding), id);
        self.add_buffer(BufferInfo::new(id, buffer_type).at(descriptor_set, binding));
        Ok(id)
    }

    /// Create samplers for literal sampler masks and bind them.
    #[tracing::instrument(skip_all, fields(pipeline = %self.name))]
    pub fn generate_opencl_literal_samplers(&mut self, samplers: &mut Arena<SamplerId, Sampler>) -> RecipeResult<()> {
        for info in &mut self.samplers {
            if info.sampler.is_some() || info.mask == UNBOUND {
                continue;
            }

            let mut sampler =
                Sampler::new(format!("literal.{}.{}", info.descriptor_set, info.binding));
            sampler.normalized_coords = info.mask & CL_NORMALIZED_COORDS_BIT != 0;

            let address_mode = match info.mask & CL_ADDRESS_MODE_BITS {
                CL_ADDRESS_NONE | CL_ADDRESS_CLAMP_TO_EDGE => Some(AddressMode::ClampToEdge),
                CL_ADDRESS_CLAMP => Some(AddressMode::ClampToBorder),
                CL_ADDRESS_REPEAT => Some(AddressMode::Repeat),
                CL_ADDRESS_MIRRORED_REPEAT => Some(AddressMode::MirroredRepeat),
                _ => None,
            };
            if let Some(mode) = address_mode {
                sampler.set_address_mode(mode);
            }

            let filter = if info.mask & CL_FILTER_NEAREST_BIT != 0 {
                Some(FilterType::Nearest)
            } else if info.mask & CL_FILTER_LINEAR_BIT != 0 {
                Some(FilterType::Linear)
            } else {
                None
            };
            if let Some(filter) = filter {
                sampler.mag_filter = filter;
                sampler.min_filter = filter;
            }

            // Kernels never see more than one mip level.
            sampler.min_lod = 0.0;
            sampler.max_lod = 0.0;

            let id = samplers.push(sampler);
            self.literal_samplers.push(id);
            info.sampler = Some(id);
        }
        Ok(())
    }

    /// Create and fill the push-constant buffer for the kernel's generated push constants.
    #[tracing::instrument(skip_all, fields(pipeline = %self.name))]
    pub fn generate_opencl_push_constants(&mut self, buffers: &mut Arena<BufferId, Buffer>) -> RecipeResult<()> {
        let Some((info, _)) = self.opencl_kernel() else {
            return Ok(());
        };
        if info.push_constants.is_empty() {
            return Ok(());
        }
        let push_constants = info.push_constants.clone();

        let id = self.create_push_constant_buffer(buffers)?;
        let buf = buffer_mut(buffers, id)?;
        for pc in &push_constants {
            if pc.offset % 4 != 0 || pc.size % 4 != 0 {
                return Err(RecipeError::validation(format!(
                    "push constant at offset {} with size {} is not word aligned",
                    pc.offset, pc.size
                )));
            }
            if buf.size_in_bytes() < pc.offset + pc.size {
                buf.set_size_in_bytes(pc.offset + pc.size)?;
            }

            let mut words = vec![0u32; (pc.size / 4) as usize];
            match pc.push_constant_type {
                // Kernel launches are always 3D.
                PushConstantType::Dimensions => {
                    if let Some(first) = words.first_mut() {
                        *first = 3;
                    }
                }
                PushConstantType::GlobalOffset | PushConstantType::RegionOffset => {}
            }

            let start = pc.offset as usize;
            let dst = &mut buf.bytes_mut()[start..start + pc.size as usize];
            for (chunk, word) in dst.chunks_exact_mut(4).zip(&words) {
                chunk.copy_from_slice(&word.to_le_bytes());
            }
        }
        Ok(())
    }

    /// Copy of this pipeline under `name`, sharing the script's buffers and shaders.
    ///
    /// PoD buffers are per pipeline, so the copy gets freshly generated ones.
    pub fn clone_pipeline(
        &self,
        name: impl Into<String>,
        buffers: &mut Arena<BufferId, Buffer>,
    ) -> RecipeResult<Pipeline> {
        let mut clone = Pipeline::new(name, self.pipeline_type);
        clone.shaders = self.shaders.clone();
        clone.color_attachments = self.color_attachments.clone();
        clone.vertex_buffers = self.vertex_buffers.clone();
        clone.buffers = self
            .buffers
            .iter()
            .filter(|info| !self.pod_buffers.values().any(|id| *id == info.buffer))
            .cloned()
            .collect();
        clone.depth_stencil_buffer = self.depth_stencil_buffer.clone();
        clone.index_buffer = self.index_buffer;
        clone.fb_width = self.fb_width;
        clone.fb_height = self.fb_height;
        clone.set_arg_values = self.set_arg_values.clone();
        clone.pipeline_data = self.pipeline_data.clone();

        if !self.pod_buffers.is_empty() {
            clone.generate_opencl_pod_buffers(buffers)?;
        }
        Ok(clone)
    }
}

// Little-endian bytes of a scalar kernel argument, one value per byte.
fn arg_bytes(arg: &ArgSetInfo) -> Vec<Value> {
    let size = arg.format.size_in_bytes();
    let bits: u64 = match arg.value {
        Value::Double(_) if size == 8 => arg.value.as_double().to_bits(),
        Value::Double(_) => u64::from(arg.value.as_float().to_bits()),
        Value::Int(_) => arg.value.as_uint64(),
    };
    (0..size)
        .map(|i| Value::from_int(bits.checked_shr(i * 8).unwrap_or(0) & 0xff))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/pipeline.rs"]
mod tests;
