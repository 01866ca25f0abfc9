//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod renderer;
pub mod sources;

pub use renderer::*;
pub use sources::*;
