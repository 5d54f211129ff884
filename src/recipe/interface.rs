use serde::Serialize;

use crate::recipe::shader::{ShaderFormat, ShaderType};

/// A shader as the engine sees it: one entry per pipeline the shader is attached to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShaderInfo {
    /// Source encoding.
    pub format: ShaderFormat,
    /// Declared stage.
    pub shader_type: ShaderType,
    /// `<pipeline>-<shader>` for attached shaders, the bare shader name otherwise.
    pub name: String,
    /// Source text.
    pub source: String,
    /// Optimizer passes requested by the pipeline.
    pub optimizations: Vec<String>,
    /// SPIR-V target environment of the shader.
    pub target_env: String,
    /// Compiled words, when the pipeline already holds them.
    pub data: Vec<u32>,
}

/// Read-only view of a parsed script handed to an engine.
pub trait Recipe {
    /// Shaders to compile, per pipeline.
    fn shader_infos(&self) -> Vec<ShaderInfo>;
    /// Device features the script needs.
    fn required_features(&self) -> Vec<String>;
    /// Device extensions the script needs.
    fn required_device_extensions(&self) -> Vec<String>;
    /// Instance extensions the script needs.
    fn required_instance_extensions(&self) -> Vec<String>;
    /// Override how long the engine waits on a fence.
    fn set_fence_timeout(&mut self, timeout_ms: u32);
}
