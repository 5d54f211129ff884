//! Commands recorded by a test section, in execution order.
//!
//! Every command remembers the script line it came from. Commands that act on a pipeline also
//! carry its id and the `timed` flag the engine uses to report execution time.

use serde::Serialize;
use smallvec::SmallVec;

use crate::foundation::ids::{BufferId, FormatId, PipelineId, SamplerId, TlasId};
use crate::foundation::value::Value;
use crate::recipe::pipeline_data::{PipelineData, Topology};
use crate::recipe::shader::ShaderType;

/// Slack allowed when probing one channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tolerance {
    /// Percentage of the expected value instead of an absolute difference.
    pub is_percent: bool,
    /// Allowed difference.
    pub value: f64,
}

impl Tolerance {
    /// Absolute tolerance.
    pub fn absolute(value: f64) -> Self {
        Self {
            is_percent: false,
            value,
        }
    }

    /// Percentage tolerance.
    pub fn percent(value: f64) -> Self {
        Self {
            is_percent: true,
            value,
        }
    }
}

/// No tolerance, one shared by every channel, or one per RGBA channel.
pub type Tolerances = SmallVec<[Tolerance; 4]>;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ClearCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
}

/// Colour later `clear` commands fill attachments with.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ClearColorCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ClearDepthCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub value: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ClearStencilCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub value: u32,
}

/// Draw a screen-space rectangle with the state captured at parse time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct DrawRectCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub data: PipelineData,
    pub is_ortho: bool,
    pub is_patch: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Draw a grid of `columns` x `rows` rectangles.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct DrawGridCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub data: PipelineData,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub columns: u32,
    pub rows: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct DrawArraysCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub data: PipelineData,
    pub is_indexed: bool,
    pub is_instanced: bool,
    pub topology: Topology,
    pub first_vertex_index: u32,
    pub vertex_count: u32,
    pub first_instance: u32,
    pub instance_count: u32,
}

/// Dispatch `x * y * z` workgroups.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ComputeCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

/// Trace `x * y * z` rays through the named shader binding tables.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct RayTracingCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub raygen_sbt: Option<String>,
    pub miss_sbt: Option<String>,
    pub hit_sbt: Option<String>,
    pub callable_sbt: Option<String>,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct PatchParameterVerticesCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub control_point_count: u32,
}

/// Switch the entry point of the shader bound to `shader_type`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct EntryPointCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub shader_type: ShaderType,
    pub entry_point_name: String,
}

/// Descriptor kind a [`BufferCommand`] binds its buffer as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum BufferCommandType {
    Ssbo,
    SsboDynamic,
    Uniform,
    UniformDynamic,
    PushConstant,
    StorageImage,
    SampledImage,
    CombinedImageSampler,
    UniformTexelBuffer,
    StorageTexelBuffer,
}

/// Size a bound buffer or write values into it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct BufferCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub buffer_type: BufferCommandType,
    pub buffer: BufferId,
    pub sampler: Option<SamplerId>,
    pub descriptor_set: u32,
    pub binding: u32,
    pub is_subdata: bool,
    pub offset: u32,
    pub base_mip_level: u32,
    pub dynamic_offset: u32,
    pub descriptor_offset: u64,
    pub descriptor_range: u64,
    pub values: Vec<Value>,
}

impl BufferCommand {
    /// Command binding `buffer` as `buffer_type` at set 0, binding 0 over its whole range.
    pub fn new(line: usize, pipeline: PipelineId, buffer_type: BufferCommandType, buffer: BufferId) -> Self {
        Self {
            line,
            pipeline,
            timed: false,
            buffer_type,
            buffer,
            sampler: None,
            descriptor_set: 0,
            binding: 0,
            is_subdata: false,
            offset: 0,
            base_mip_level: 0,
            dynamic_offset: 0,
            descriptor_offset: 0,
            descriptor_range: u64::MAX,
            values: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct SamplerCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub descriptor_set: u32,
    pub binding: u32,
    pub sampler: SamplerId,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct TlasCommand {
    pub line: usize,
    pub pipeline: PipelineId,
    pub timed: bool,
    pub descriptor_set: u32,
    pub binding: u32,
    pub tlas: TlasId,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct CopyCommand {
    pub line: usize,
    pub buffer_from: BufferId,
    pub buffer_to: BufferId,
}

/// How a [`CompareBufferCommand`] compares its buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferComparator {
    /// Byte-for-byte equality.
    #[default]
    Eq,
    /// Root mean square error within tolerance.
    Rmse,
    /// Earth mover's distance between channel histograms within tolerance.
    HistogramEmd,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct CompareBufferCommand {
    pub line: usize,
    pub buffer_1: BufferId,
    pub buffer_2: BufferId,
    pub comparator: BufferComparator,
    pub tolerance: f32,
}

/// Channels a [`ProbeCommand`] checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ColorFormat {
    #[default]
    Rgb,
    Rgba,
}

/// Check a point or rectangle of a colour attachment.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ProbeCommand {
    pub line: usize,
    pub buffer: BufferId,
    pub tolerances: Tolerances,
    pub is_whole_window: bool,
    pub is_probe_rect: bool,
    pub is_relative: bool,
    pub color_format: ColorFormat,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ProbeCommand {
    /// Single-pixel RGB probe of `buffer` at the origin.
    pub fn new(line: usize, buffer: BufferId) -> Self {
        Self {
            line,
            buffer,
            tolerances: Tolerances::new(),
            is_whole_window: false,
            is_probe_rect: false,
            is_relative: false,
            color_format: ColorFormat::Rgb,
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        }
    }

    /// True when alpha is checked too.
    pub fn is_rgba(&self) -> bool {
        self.color_format == ColorFormat::Rgba
    }
}

/// Comparison a [`ProbeSsboCommand`] applies to each value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ProbeComparator {
    #[default]
    Equal,
    NotEqual,
    FuzzyEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

/// Check values of a storage buffer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct ProbeSsboCommand {
    pub line: usize,
    pub buffer: BufferId,
    pub tolerances: Tolerances,
    pub comparator: ProbeComparator,
    pub descriptor_set: u32,
    pub binding: u32,
    pub offset: u32,
    pub format: FormatId,
    pub values: Vec<Value>,
}

/// Run the nested commands `count` times.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct RepeatCommand {
    pub line: usize,
    pub count: u32,
    pub commands: Vec<Command>,
}

/// One recorded command.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Command {
    Clear(ClearCommand),
    ClearColor(ClearColorCommand),
    ClearDepth(ClearDepthCommand),
    ClearStencil(ClearStencilCommand),
    DrawRect(DrawRectCommand),
    DrawGrid(DrawGridCommand),
    DrawArrays(DrawArraysCommand),
    Compute(ComputeCommand),
    RayTracing(RayTracingCommand),
    PatchParameterVertices(PatchParameterVerticesCommand),
    EntryPoint(EntryPointCommand),
    Buffer(BufferCommand),
    Sampler(SamplerCommand),
    Tlas(TlasCommand),
    Copy(CopyCommand),
    CompareBuffer(CompareBufferCommand),
    Probe(ProbeCommand),
    ProbeSsbo(ProbeSsboCommand),
    Repeat(RepeatCommand),
}

impl Command {
    /// Script line the command was parsed from.
    pub fn line(&self) -> usize {
        match self {
            Self::Clear(c) => c.line,
            Self::ClearColor(c) => c.line,
            Self::ClearDepth(c) => c.line,
            Self::ClearStencil(c) => c.line,
            Self::DrawRect(c) => c.line,
            Self::DrawGrid(c) => c.line,
            Self::DrawArrays(c) => c.line,
            Self::Compute(c) => c.line,
            Self::RayTracing(c) => c.line,
            Self::PatchParameterVertices(c) => c.line,
            Self::EntryPoint(c) => c.line,
            Self::Buffer(c) => c.line,
            Self::Sampler(c) => c.line,
            Self::Tlas(c) => c.line,
            Self::Copy(c) => c.line,
            Self::CompareBuffer(c) => c.line,
            Self::Probe(c) => c.line,
            Self::ProbeSsbo(c) => c.line,
            Self::Repeat(c) => c.line,
        }
    }

    /// Pipeline the command runs on, for pipeline commands.
    pub fn pipeline(&self) -> Option<PipelineId> {
        match self {
            Self::Clear(c) => Some(c.pipeline),
            Self::ClearColor(c) => Some(c.pipeline),
            Self::ClearDepth(c) => Some(c.pipeline),
            Self::ClearStencil(c) => Some(c.pipeline),
            Self::DrawRect(c) => Some(c.pipeline),
            Self::DrawGrid(c) => Some(c.pipeline),
            Self::DrawArrays(c) => Some(c.pipeline),
            Self::Compute(c) => Some(c.pipeline),
            Self::RayTracing(c) => Some(c.pipeline),
            Self::PatchParameterVertices(c) => Some(c.pipeline),
            Self::EntryPoint(c) => Some(c.pipeline),
            Self::Buffer(c) => Some(c.pipeline),
            Self::Sampler(c) => Some(c.pipeline),
            Self::Tlas(c) => Some(c.pipeline),
            Self::Copy(_)
            | Self::CompareBuffer(_)
            | Self::Probe(_)
            | Self::ProbeSsbo(_)
            | Self::Repeat(_) => None,
        }
    }

    /// True when the engine should time the command.
    pub fn is_timed(&self) -> bool {
        match self {
            Self::Clear(c) => c.timed,
            Self::ClearColor(c) => c.timed,
            Self::ClearDepth(c) => c.timed,
            Self::ClearStencil(c) => c.timed,
            Self::DrawRect(c) => c.timed,
            Self::DrawGrid(c) => c.timed,
            Self::DrawArrays(c) => c.timed,
            Self::Compute(c) => c.timed,
            Self::RayTracing(c) => c.timed,
            Self::PatchParameterVertices(c) => c.timed,
            Self::EntryPoint(c) => c.timed,
            Self::Buffer(c) => c.timed,
            Self::Sampler(c) => c.timed,
            Self::Tlas(c) => c.timed,
            _ => false,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear(_) => "ClearCommand",
            Self::ClearColor(_) => "ClearColorCommand",
            Self::ClearDepth(_) => "ClearDepthCommand",
            Self::ClearStencil(_) => "ClearStencilCommand",
            Self::DrawRect(_) => "DrawRectCommand",
            Self::DrawGrid(_) => "DrawGridCommand",
            Self::DrawArrays(_) => "DrawArraysCommand",
            Self::Compute(_) => "ComputeCommand",
            Self::RayTracing(_) => "RayTracingCommand",
            Self::PatchParameterVertices(_) => "PatchParameterVerticesCommand",
            Self::EntryPoint(_) => "EntryPointCommand",
            Self::Buffer(_) => "BufferCommand",
            Self::Sampler(_) => "SamplerCommand",
            Self::Tlas(_) => "TlasCommand",
            Self::Copy(_) => "CopyCommand",
            Self::CompareBuffer(_) => "CompareBufferCommand",
            Self::Probe(_) => "ProbeCommand",
            Self::ProbeSsbo(_) => "ProbeSSBOCommand",
            Self::Repeat(_) => "RepeatCommand",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/command.rs"]
mod tests;
