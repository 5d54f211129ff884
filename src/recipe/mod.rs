pub mod acceleration;
pub mod buffer;
pub mod command;
pub mod interface;
pub mod pipeline;
pub mod pipeline_data;
pub mod sampler;
pub mod script;
pub mod shader;
