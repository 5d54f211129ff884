use serde::Serialize;

/// Pipeline stage a shader runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ShaderType {
    Compute,
    Geometry,
    Fragment,
    Vertex,
    TessellationControl,
    TessellationEvaluation,
    RayGeneration,
    AnyHit,
    ClosestHit,
    Miss,
    Intersection,
    Callable,
}

impl ShaderType {
    /// True for the six ray-tracing stages.
    pub fn is_ray_tracing(self) -> bool {
        matches!(
            self,
            Self::RayGeneration
                | Self::AnyHit
                | Self::ClosestHit
                | Self::Miss
                | Self::Intersection
                | Self::Callable
        )
    }

    /// Stages usable as the single shader of a general group.
    pub fn is_general(self) -> bool {
        matches!(self, Self::RayGeneration | Self::Miss | Self::Callable)
    }
}

/// Source language or encoding of a shader body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ShaderFormat {
    #[default]
    Default,
    Text,
    Glsl,
    Hlsl,
    SpirvAsm,
    SpirvHex,
    OpenClC,
    Binary,
}

/// A named shader module.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shader {
    name: String,
    shader_type: ShaderType,
    format: ShaderFormat,
    data: String,
    binary: Vec<u32>,
    file_path: String,
    target_env: String,
}

impl Shader {
    /// Empty shader of `shader_type`.
    pub fn new(name: impl Into<String>, shader_type: ShaderType) -> Self {
        Self {
            name: name.into(),
            shader_type,
            format: ShaderFormat::Default,
            data: String::new(),
            binary: Vec::new(),
            file_path: String::new(),
            target_env: String::new(),
        }
    }

    /// Builder-style source setter.
    pub fn with_data(mut self, format: ShaderFormat, data: impl Into<String>) -> Self {
        self.format = format;
        self.data = data.into();
        self
    }

    /// Unique name within the script.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stage the shader was declared for.
    pub fn shader_type(&self) -> ShaderType {
        self.shader_type
    }

    /// Encoding of [`Shader::data`].
    pub fn format(&self) -> ShaderFormat {
        self.format
    }

    /// Change the encoding tag.
    pub fn set_format(&mut self, format: ShaderFormat) {
        self.format = format;
    }

    /// Source text.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Replace the source text.
    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    /// Pre-compiled SPIR-V words for [`ShaderFormat::Binary`] shaders.
    pub fn binary(&self) -> &[u32] {
        &self.binary
    }

    /// Attach pre-compiled words and mark the shader binary.
    pub fn set_binary(&mut self, words: Vec<u32>) {
        self.format = ShaderFormat::Binary;
        self.binary = words;
    }

    /// File the source was loaded from, or empty for inline shaders.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Record the source path.
    pub fn set_file_path(&mut self, path: impl Into<String>) {
        self.file_path = path.into();
    }

    /// Per-shader SPIR-V target environment, or empty for the script default.
    pub fn target_env(&self) -> &str {
        &self.target_env
    }

    /// Override the target environment.
    pub fn set_target_env(&mut self, env: impl Into<String>) {
        self.target_env = env.into();
    }
}
