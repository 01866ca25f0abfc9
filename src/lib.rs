//! Supper - 正在播放封面显示
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Artwork: 封面请求与缓存 key
//! - Playback: 播放状态事件
//! - Display: 旋转与 RGB565 像素编码
//!
//! 应用层 (application/):
//! - Ports: ArtworkSource, ArtworkCache, Display
//! - Queries: 封面解析（缓存 → 数据源回退链 → 静态图片）
//! - Commands: 渲染到显示设备
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: iTunes / MusicBrainz 客户端, 帧缓冲渲染器
//! - Persistence: 磁盘缓存
//! - HTTP: `/nowplaying` 接口

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
