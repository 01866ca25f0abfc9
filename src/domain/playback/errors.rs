//! Playback Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("缺少字段: {0}")]
    MissingField(&'static str),

    #[error("无效的播放状态: {0}")]
    InvalidState(String),
}
