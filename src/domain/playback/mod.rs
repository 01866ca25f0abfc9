//! Playback Context - 播放事件限界上下文
//!
//! 职责:
//! - "正在播放" 事件的校验
//! - 播放状态枚举

mod errors;
mod value_objects;

pub use errors::PlaybackError;
pub use value_objects::{NowPlayingEvent, PlaybackState};
