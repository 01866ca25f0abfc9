//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ArtworkSource、ArtworkCache、Display）
//! - queries: 封面解析（缓存 + 回退链）
//! - commands: 渲染到显示设备
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{ShowImageHandler, ShowNowPlayingHandler},
    ShowImage, ShowNowPlaying, ShowNowPlayingResponse,
};

pub use error::ApplicationError;

pub use ports::{
    ArtworkCachePort, ArtworkSourcePort, CacheError, DisplayPort, RenderError, SourceError,
};

pub use queries::{handlers::ResolveArtworkHandler, ResolveArtwork, ResolvedArtwork};
