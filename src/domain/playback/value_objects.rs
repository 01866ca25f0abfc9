//! Playback Context - Value Objects

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::PlaybackError;
use crate::domain::artwork::ArtworkRequest;

/// 播放状态，仅允许两个取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl FromStr for PlaybackState {
    type Err = PlaybackError;

    /// 大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "playing" => Ok(Self::Playing),
            "paused" => Ok(Self::Paused),
            _ => Err(PlaybackError::InvalidState(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "正在播放" 事件
///
/// 不变量:
/// - artist / album / track 均非空
/// - state 为 Playing 或 Paused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NowPlayingEvent {
    artist: String,
    album: String,
    track: String,
    state: PlaybackState,
}

impl NowPlayingEvent {
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        track: impl Into<String>,
        state: &str,
    ) -> Result<Self, PlaybackError> {
        let artist = required("artist", artist.into())?;
        let album = required("album", album.into())?;
        let track = required("track", track.into())?;
        let state = state.parse()?;

        Ok(Self {
            artist,
            album,
            track,
            state,
        })
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// 事件对应的封面请求
    pub fn artwork_request(&self) -> ArtworkRequest {
        ArtworkRequest::new(self.artist.clone(), self.album.clone())
    }
}

fn required(field: &'static str, value: String) -> Result<String, PlaybackError> {
    if value.is_empty() {
        return Err(PlaybackError::MissingField(field));
    }
    Ok(value)
}
