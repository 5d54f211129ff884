//! amber-recipe is the front-end of a declarative GPU test runner.
//!
//! It turns the command language of a `[test]` section into a typed recipe: pipelines with
//! their shaders and bindings, the buffers and samplers they use, and an ordered list of
//! [`Command`]s. No GPU work happens here; an engine consumes the result through [`Recipe`].
//!
//! # Layers
//!
//! 1. **Data**: [`Value`], [`Type`] and [`Format`] describe host literals and device layouts.
//!    [`copy_value_to_buffer`] packs values into bytes, small floats included.
//! 2. **Recipe**: [`Script`] owns every [`Buffer`], [`Shader`], [`Pipeline`] and [`Sampler`]
//!    in arenas and hands out typed ids.
//! 3. **Parsing**: [`Tokenizer`] and [`CommandParser`] read the command language into the
//!    script, reporting failures as `"<line>: <message>"`.
//!
//! ```
//! use amber_recipe::{CommandParser, Pipeline, PipelineType, Script};
//!
//! let mut script = Script::new();
//! let id = script.add_pipeline(Pipeline::new("compute", PipelineType::Compute))?;
//! let mut parser = CommandParser::new(&mut script, id, 1, "ssbo 0 subdata int 0 1 2 3\ncompute 1 1 1");
//! parser.parse()?;
//! assert_eq!(parser.commands().len(), 2);
//! # Ok::<(), amber_recipe::RecipeError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod data;
mod foundation;
mod recipe;
mod vkscript;

pub use data::bit_copy::{copy_memory_to_buffer, copy_value_to_buffer};
pub use data::datum_type_parser::{parse_datum_format, parse_datum_type};
pub use data::format::{Format, Layout, Segment};
pub use data::format_type::FormatType;
pub use data::small_float::{
    float_to_hex_float, float_to_hex_float10, float_to_hex_float11, float_to_hex_float16,
    hex_float_to_float,
};
pub use data::type_parser::{parse_format, parse_type};
pub use data::types::{FormatComponentType, FormatMode, List, ListMember, Number, Type};
pub use foundation::arena::{Arena, ArenaId};
pub use foundation::error::{RecipeError, RecipeResult};
pub use foundation::ids::{
    BlasId, BufferId, FormatId, PipelineId, SamplerId, ShaderId, TlasId, TypeId,
};
pub use foundation::value::Value;
pub use recipe::acceleration::{
    Blas, BlasInstance, Geometry, GeometryType, Sbt, SbtRecord, ShaderGroup, Tlas,
};
pub use recipe::buffer::{Buffer, BufferType, InputRate};
pub use recipe::command::{
    BufferCommand, BufferCommandType, BufferComparator, ClearColorCommand, ClearCommand,
    ClearDepthCommand, ClearStencilCommand, ColorFormat, Command, CompareBufferCommand,
    ComputeCommand, CopyCommand, DrawArraysCommand, DrawGridCommand, DrawRectCommand,
    EntryPointCommand, PatchParameterVerticesCommand, ProbeCommand, ProbeComparator,
    ProbeSsboCommand, RayTracingCommand, RepeatCommand, SamplerCommand, TlasCommand, Tolerance,
    Tolerances,
};
pub use recipe::interface::{Recipe, ShaderInfo};
pub use recipe::pipeline::{
    ArgSetInfo, BufferInfo, DescriptorKind, DescriptorMapEntry, GENERATED_COLOR_BUFFER,
    GENERATED_DEPTH_BUFFER, GENERATED_PUSH_CONSTANT_BUFFER, Pipeline, PipelineShaderInfo,
    PipelineState, PipelineType, PushConstant, PushConstantType, RequiredSubgroupSize,
    SamplerInfo, TlasInfo,
};
pub use recipe::pipeline_data::{
    BlendFactor, BlendOp, COLOR_MASK_A, COLOR_MASK_B, COLOR_MASK_G, COLOR_MASK_R, CompareOp,
    CullMode, FrontFace, LogicOp, PipelineData, PolygonMode, StencilOp, Topology, Viewport,
};
pub use recipe::sampler::{AddressMode, BorderColor, FilterType, Sampler};
pub use recipe::script::{DEFAULT_FENCE_TIMEOUT_MS, Script};
pub use recipe::shader::{Shader, ShaderFormat, ShaderType};
pub use vkscript::command_parser::CommandParser;
pub use vkscript::names;
pub use vkscript::tokenizer::{Token, Tokenizer};
