use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::format::Format;
use crate::data::type_parser::parse_type;
use crate::data::types::Type;
use crate::foundation::arena::{Arena, ArenaId};
use crate::foundation::error::{RecipeError, RecipeResult};
use crate::foundation::ids::{
    BlasId, BufferId, FormatId, PipelineId, SamplerId, ShaderId, TlasId, TypeId,
};
use crate::recipe::acceleration::{Blas, Tlas};
use crate::recipe::buffer::Buffer;
use crate::recipe::command::Command;
use crate::recipe::interface::{Recipe, ShaderInfo};
use crate::recipe::pipeline::Pipeline;
use crate::recipe::sampler::Sampler;
use crate::recipe::shader::Shader;

/// Fence timeout used until the engine sets one.
pub const DEFAULT_FENCE_TIMEOUT_MS: u32 = 10_000;

const INSTANCE_EXTENSIONS: &[&str] = &["VK_KHR_get_physical_device_properties2"];

const KNOWN_FEATURES: &[&str] = &[
    "robustBufferAccess",
    "fullDrawIndexUint32",
    "imageCubeArray",
    "independentBlend",
    "geometryShader",
    "tessellationShader",
    "sampleRateShading",
    "dualSrcBlend",
    "logicOp",
    "multiDrawIndirect",
    "drawIndirectFirstInstance",
    "depthClamp",
    "depthBiasClamp",
    "fillModeNonSolid",
    "depthBounds",
    "wideLines",
    "largePoints",
    "alphaToOne",
    "multiViewport",
    "samplerAnisotropy",
    "textureCompressionETC2",
    "textureCompressionASTC_LDR",
    "textureCompressionBC",
    "occlusionQueryPrecise",
    "pipelineStatisticsQuery",
    "vertexPipelineStoresAndAtomics",
    "fragmentStoresAndAtomics",
    "shaderTessellationAndGeometryPointSize",
    "shaderImageGatherExtended",
    "shaderStorageImageExtendedFormats",
    "shaderStorageImageMultisample",
    "shaderStorageImageReadWithoutFormat",
    "shaderStorageImageWriteWithoutFormat",
    "shaderUniformBufferArrayDynamicIndexing",
    "shaderSampledImageArrayDynamicIndexing",
    "shaderStorageBufferArrayDynamicIndexing",
    "shaderStorageImageArrayDynamicIndexing",
    "shaderClipDistance",
    "shaderCullDistance",
    "shaderFloat64",
    "shaderInt64",
    "shaderInt16",
    "shaderResourceResidency",
    "shaderResourceMinLod",
    "sparseBinding",
    "sparseResidencyBuffer",
    "sparseResidencyImage2D",
    "sparseResidencyImage3D",
    "sparseResidency2Samples",
    "sparseResidency4Samples",
    "sparseResidency8Samples",
    "sparseResidency16Samples",
    "sparseResidencyAliased",
    "variableMultisampleRate",
    "inheritedQueries",
    "VariablePointerFeatures.variablePointers",
    "VariablePointerFeatures.variablePointersStorageBuffer",
    "Float16Int8Features.shaderFloat16",
    "Float16Int8Features.shaderInt8",
    "Storage8BitFeatures.storageBuffer8BitAccess",
    "Storage8BitFeatures.uniformAndStorageBuffer8BitAccess",
    "Storage8BitFeatures.storagePushConstant8",
    "Storage16BitFeatures.storageBuffer16BitAccess",
    "Storage16BitFeatures.uniformAndStorageBuffer16BitAccess",
    "Storage16BitFeatures.storagePushConstant16",
    "Storage16BitFeatures.storageInputOutput16",
    "SubgroupSizeControl.subgroupSizeControl",
    "SubgroupSizeControl.computeFullSubgroups",
    "SubgroupSupportedOperations.basic",
    "SubgroupSupportedOperations.vote",
    "SubgroupSupportedOperations.arithmetic",
    "SubgroupSupportedOperations.ballot",
    "SubgroupSupportedOperations.shuffle",
    "SubgroupSupportedOperations.shuffleRelative",
    "SubgroupSupportedOperations.clustered",
    "SubgroupSupportedOperations.quad",
    "SubgroupSupportedStages.vertex",
    "SubgroupSupportedStages.tessellationControl",
    "SubgroupSupportedStages.tessellationEvaluation",
    "SubgroupSupportedStages.geometry",
    "SubgroupSupportedStages.fragment",
    "SubgroupSupportedStages.compute",
];

/// Arena plus name index for one kind of named entity.
#[derive(Clone, Debug)]
struct Named<I, T> {
    items: Arena<I, T>,
    names: BTreeMap<String, I>,
}

impl<I, T> Default for Named<I, T> {
    fn default() -> Self {
        Self {
            items: Arena::default(),
            names: BTreeMap::new(),
        }
    }
}

impl<I: ArenaId, T> Named<I, T> {
    fn insert(&mut self, name: &str, item: T, what: &str) -> RecipeResult<I> {
        if self.names.contains_key(name) {
            return Err(RecipeError::validation(format!(
                "duplicate {what} name provided"
            )));
        }
        let id = self.items.push(item);
        self.names.insert(name.to_owned(), id);
        Ok(id)
    }

    fn id(&self, name: &str) -> Option<I> {
        self.names.get(name).copied()
    }

    fn by_name(&self, name: &str) -> Option<&T> {
        self.id(name).and_then(|id| self.items.get(id))
    }
}

/// Everything a parsed script declares, plus its commands.
///
/// Entities live in arenas and are referenced by id; names are unique per kind.
#[derive(Clone, Debug, Serialize)]
pub struct Script {
    #[serde(serialize_with = "serialize_items")]
    pipelines: Named<PipelineId, Pipeline>,
    #[serde(serialize_with = "serialize_items")]
    shaders: Named<ShaderId, Shader>,
    #[serde(serialize_with = "serialize_items")]
    buffers: Named<BufferId, Buffer>,
    #[serde(serialize_with = "serialize_items")]
    samplers: Named<SamplerId, Sampler>,
    #[serde(serialize_with = "serialize_items")]
    blases: Named<BlasId, Blas>,
    #[serde(serialize_with = "serialize_items")]
    tlases: Named<TlasId, Tlas>,
    #[serde(skip)]
    formats: Arena<FormatId, Format>,
    #[serde(skip)]
    types: Arena<TypeId, Type>,
    #[serde(skip)]
    named_types: BTreeMap<String, Type>,
    required_features: Vec<String>,
    required_device_extensions: Vec<String>,
    required_instance_extensions: Vec<String>,
    spv_env: String,
    fence_timeout_ms: u32,
    commands: Vec<Command>,
}

fn serialize_items<S, I, T>(named: &Named<I, T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: Serialize,
{
    named.items.serialize(serializer)
}

impl Default for Script {
    fn default() -> Self {
        Self {
            pipelines: Named::default(),
            shaders: Named::default(),
            buffers: Named::default(),
            samplers: Named::default(),
            blases: Named::default(),
            tlases: Named::default(),
            formats: Arena::default(),
            types: Arena::default(),
            named_types: BTreeMap::new(),
            required_features: Vec::new(),
            required_device_extensions: Vec::new(),
            required_instance_extensions: Vec::new(),
            spv_env: String::new(),
            fence_timeout_ms: DEFAULT_FENCE_TIMEOUT_MS,
            commands: Vec::new(),
        }
    }
}

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `pipeline`; its name must be unused.
    pub fn add_pipeline(&mut self, pipeline: Pipeline) -> RecipeResult<PipelineId> {
        let name = pipeline.name().to_owned();
        self.pipelines.insert(&name, pipeline, "pipeline")
    }

    /// Pipeline called `name`.
    pub fn get_pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.by_name(name)
    }

    /// Id of the pipeline called `name`.
    pub fn pipeline_id(&self, name: &str) -> Option<PipelineId> {
        self.pipelines.id(name)
    }

    /// Pipeline behind `id`.
    pub fn pipeline(&self, id: PipelineId) -> Option<&Pipeline> {
        self.pipelines.items.get(id)
    }

    /// Mutable pipeline behind `id`.
    pub fn pipeline_mut(&mut self, id: PipelineId) -> Option<&mut Pipeline> {
        self.pipelines.items.get_mut(id)
    }

    /// All pipelines in declaration order.
    pub fn pipelines(&self) -> &Arena<PipelineId, Pipeline> {
        &self.pipelines.items
    }

    /// Pipeline `id` together with the buffer and sampler arenas it binds into.
    pub fn pipeline_resources_mut(
        &mut self,
        id: PipelineId,
    ) -> Option<(
        &mut Pipeline,
        &mut Arena<BufferId, Buffer>,
        &mut Arena<SamplerId, Sampler>,
    )> {
        let pipeline = self.pipelines.items.get_mut(id)?;
        Some((pipeline, &mut self.buffers.items, &mut self.samplers.items))
    }

    /// Declare a copy of pipeline `source` called `name`.
    pub fn clone_pipeline(&mut self, source: PipelineId, name: &str) -> RecipeResult<PipelineId> {
        let before = self.buffers.items.len();
        let pipeline = self
            .pipelines
            .items
            .get(source)
            .ok_or_else(|| RecipeError::validation(format!("unknown pipeline id {}", source.0)))?
            .clone_pipeline(name, &mut self.buffers.items)?;
        self.index_generated_buffers(before);
        self.add_pipeline(pipeline)
    }

    /// Run the OpenCL binding and generation passes over every pipeline.
    ///
    /// Generated buffers and samplers become reachable by name unless the name is taken.
    pub fn prepare_opencl_pipelines(&mut self) -> RecipeResult<()> {
        let buffers_before = self.buffers.items.len();
        let samplers_before = self.samplers.items.len();
        for i in 0..self.pipelines.items.len() {
            let id = PipelineId(i as u32);
            let pipeline = &mut self.pipelines.items[id];
            pipeline.update_opencl_buffer_bindings(&self.buffers.items)?;
            pipeline.generate_opencl_literal_samplers(&mut self.samplers.items)?;
            pipeline.generate_opencl_pod_buffers(&mut self.buffers.items)?;
            pipeline.generate_opencl_push_constants(&mut self.buffers.items)?;
        }
        self.index_generated_buffers(buffers_before);
        for i in samplers_before..self.samplers.items.len() {
            let id = SamplerId(i as u32);
            let name = self.samplers.items[id].name.clone();
            self.samplers.names.entry(name).or_insert(id);
        }
        Ok(())
    }

    fn index_generated_buffers(&mut self, from: usize) {
        for i in from..self.buffers.items.len() {
            let id = BufferId(i as u32);
            let name = self.buffers.items[id].name().to_owned();
            self.buffers.names.entry(name).or_insert(id);
        }
    }

    /// Add `shader`; its name must be unused.
    pub fn add_shader(&mut self, shader: Shader) -> RecipeResult<ShaderId> {
        let name = shader.name().to_owned();
        self.shaders.insert(&name, shader, "shader")
    }

    /// Shader called `name`.
    pub fn get_shader(&self, name: &str) -> Option<&Shader> {
        self.shaders.by_name(name)
    }

    /// Id of the shader called `name`.
    pub fn shader_id(&self, name: &str) -> Option<ShaderId> {
        self.shaders.id(name)
    }

    /// Shader behind `id`.
    pub fn shader(&self, id: ShaderId) -> Option<&Shader> {
        self.shaders.items.get(id)
    }

    /// Mutable shader behind `id`.
    pub fn shader_mut(&mut self, id: ShaderId) -> Option<&mut Shader> {
        self.shaders.items.get_mut(id)
    }

    /// All shaders in declaration order.
    pub fn shaders(&self) -> &Arena<ShaderId, Shader> {
        &self.shaders.items
    }

    /// Add `buffer`; its name must be unused.
    pub fn add_buffer(&mut self, buffer: Buffer) -> RecipeResult<BufferId> {
        let name = buffer.name().to_owned();
        self.buffers.insert(&name, buffer, "buffer")
    }

    /// Buffer called `name`.
    pub fn get_buffer(&self, name: &str) -> Option<&Buffer> {
        self.buffers.by_name(name)
    }

    /// Id of the buffer called `name`.
    pub fn buffer_id(&self, name: &str) -> Option<BufferId> {
        self.buffers.id(name)
    }

    /// Buffer behind `id`.
    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.items.get(id)
    }

    /// Mutable buffer behind `id`.
    pub fn buffer_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.items.get_mut(id)
    }

    /// All buffers in declaration order, generated ones included.
    pub fn buffers(&self) -> &Arena<BufferId, Buffer> {
        &self.buffers.items
    }

    /// Add `sampler`; its name must be unused.
    pub fn add_sampler(&mut self, sampler: Sampler) -> RecipeResult<SamplerId> {
        let name = sampler.name.clone();
        self.samplers.insert(&name, sampler, "sampler")
    }

    /// Sampler called `name`.
    pub fn get_sampler(&self, name: &str) -> Option<&Sampler> {
        self.samplers.by_name(name)
    }

    /// Id of the sampler called `name`.
    pub fn sampler_id(&self, name: &str) -> Option<SamplerId> {
        self.samplers.id(name)
    }

    /// Sampler behind `id`.
    pub fn sampler(&self, id: SamplerId) -> Option<&Sampler> {
        self.samplers.items.get(id)
    }

    /// All samplers in declaration order.
    pub fn samplers(&self) -> &Arena<SamplerId, Sampler> {
        &self.samplers.items
    }

    /// Add `blas`; its name must be unused.
    pub fn add_blas(&mut self, blas: Blas) -> RecipeResult<BlasId> {
        let name = blas.name.clone();
        self.blases.insert(&name, blas, "BLAS")
    }

    /// BLAS called `name`.
    pub fn get_blas(&self, name: &str) -> Option<&Blas> {
        self.blases.by_name(name)
    }

    /// Id of the BLAS called `name`.
    pub fn blas_id(&self, name: &str) -> Option<BlasId> {
        self.blases.id(name)
    }

    /// Add `tlas`; its name must be unused.
    pub fn add_tlas(&mut self, tlas: Tlas) -> RecipeResult<TlasId> {
        let name = tlas.name.clone();
        self.tlases.insert(&name, tlas, "TLAS")
    }

    /// TLAS called `name`.
    pub fn get_tlas(&self, name: &str) -> Option<&Tlas> {
        self.tlases.by_name(name)
    }

    /// Id of the TLAS called `name`.
    pub fn tlas_id(&self, name: &str) -> Option<TlasId> {
        self.tlases.id(name)
    }

    /// Take ownership of `format` so commands can refer to it by id.
    pub fn register_format(&mut self, format: Format) -> FormatId {
        self.formats.push(format)
    }

    /// Registered format behind `id`.
    pub fn format(&self, id: FormatId) -> Option<&Format> {
        self.formats.get(id)
    }

    /// Take ownership of `ty`.
    pub fn register_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty)
    }

    /// Registered type behind `id`.
    pub fn registered_type(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id)
    }

    /// Declare a named type; names are unique.
    pub fn add_type(&mut self, name: &str, ty: Type) -> RecipeResult<()> {
        if self.named_types.contains_key(name) {
            return Err(RecipeError::validation("duplicate type name provided"));
        }
        self.named_types.insert(name.to_owned(), ty);
        Ok(())
    }

    /// Type declared as `name`.
    pub fn get_type(&self, name: &str) -> Option<&Type> {
        self.named_types.get(name)
    }

    /// Named type, or the type `text` spells as a format name. Parsed types are registered.
    pub fn parse_type(&mut self, text: &str) -> Option<Type> {
        if let Some(ty) = self.get_type(text) {
            return Some(ty.clone());
        }
        let ty = parse_type(text)?;
        self.register_type(ty.clone());
        Some(ty)
    }

    /// True for device features the engine knows how to request.
    pub fn is_known_feature(&self, name: &str) -> bool {
        KNOWN_FEATURES.contains(&name)
    }

    /// Require a device feature.
    pub fn add_required_feature(&mut self, feature: impl Into<String>) {
        self.required_features.push(feature.into());
    }

    /// Require a device extension.
    pub fn add_required_device_extension(&mut self, ext: impl Into<String>) {
        self.required_device_extensions.push(ext.into());
    }

    /// Require an instance extension.
    pub fn add_required_instance_extension(&mut self, ext: impl Into<String>) {
        self.required_instance_extensions.push(ext.into());
    }

    /// Require an extension, routed to the instance or device list by name.
    pub fn add_required_extension(&mut self, ext: impl Into<String>) {
        let ext = ext.into();
        if INSTANCE_EXTENSIONS.contains(&ext.as_str()) {
            self.add_required_instance_extension(ext);
        } else {
            self.add_required_device_extension(ext);
        }
    }

    /// Required device features.
    pub fn required_features(&self) -> &[String] {
        &self.required_features
    }

    /// Required device extensions.
    pub fn required_device_extensions(&self) -> &[String] {
        &self.required_device_extensions
    }

    /// Required instance extensions.
    pub fn required_instance_extensions(&self) -> &[String] {
        &self.required_instance_extensions
    }

    /// SPIR-V target environment, empty for the engine default.
    pub fn spv_env(&self) -> &str {
        &self.spv_env
    }

    /// Set the SPIR-V target environment.
    pub fn set_spv_env(&mut self, env: impl Into<String>) {
        self.spv_env = env.into();
    }

    /// Fence timeout in milliseconds.
    pub fn fence_timeout_ms(&self) -> u32 {
        self.fence_timeout_ms
    }

    /// Append a command.
    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Replace the command list.
    pub fn set_commands(&mut self, commands: Vec<Command>) {
        self.commands = commands;
    }

    /// Commands in execution order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

impl Recipe for Script {
    fn shader_infos(&self) -> Vec<ShaderInfo> {
        let mut infos = Vec::new();
        for (shader_id, shader) in self.shaders.items.iter() {
            let mut in_pipeline = false;
            // One entry per pipeline: each may optimize the shader differently.
            for (_, pipeline) in self.pipelines.items.iter() {
                let Some(info) = pipeline.shaders().iter().find(|s| s.shader() == shader_id) else {
                    continue;
                };
                infos.push(ShaderInfo {
                    format: shader.format(),
                    shader_type: shader.shader_type(),
                    name: format!("{}-{}", pipeline.name(), shader.name()),
                    source: shader.data().to_owned(),
                    optimizations: info.optimizations().to_vec(),
                    target_env: shader.target_env().to_owned(),
                    data: info.data.clone(),
                });
                in_pipeline = true;
            }

            if !in_pipeline {
                infos.push(ShaderInfo {
                    format: shader.format(),
                    shader_type: shader.shader_type(),
                    name: shader.name().to_owned(),
                    source: shader.data().to_owned(),
                    optimizations: Vec::new(),
                    target_env: shader.target_env().to_owned(),
                    data: Vec::new(),
                });
            }
        }
        infos
    }

    fn required_features(&self) -> Vec<String> {
        self.required_features.clone()
    }

    fn required_device_extensions(&self) -> Vec<String> {
        self.required_device_extensions.clone()
    }

    fn required_instance_extensions(&self) -> Vec<String> {
        self.required_instance_extensions.clone()
    }

    fn set_fence_timeout(&mut self, timeout_ms: u32) {
        self.fence_timeout_ms = timeout_ms;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/script.rs"]
mod tests;
