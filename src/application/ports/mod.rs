//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artwork_cache;
mod artwork_source;
mod display;

pub use artwork_cache::{ArtworkCachePort, CacheError};
pub use artwork_source::{ArtworkSourcePort, SourceError};
pub use display::{DisplayPort, RenderError};
