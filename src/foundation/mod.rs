pub mod arena;
pub mod error;
pub mod ids;
pub mod value;
