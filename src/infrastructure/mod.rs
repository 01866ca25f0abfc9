//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现：
//! - adapters: 封面数据源（iTunes、MusicBrainz）与帧缓冲渲染器
//! - persistence: 磁盘封面缓存
//! - http: 播放状态通知接口

pub mod adapters;
pub mod http;
pub mod persistence;

pub use adapters::{FramebufferRenderer, ItunesClient, MusicBrainzClient};
pub use persistence::disk::FileArtworkCache;
