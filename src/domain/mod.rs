//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Artwork Context: 专辑封面标识与缓存 key
//! - Playback Context: "正在播放" 事件
//! - Display Context: 屏幕方向与像素格式

pub mod artwork;
pub mod display;
pub mod playback;
