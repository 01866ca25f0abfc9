//! Data Transfer Objects

use serde::Serialize;

use crate::application::ShowNowPlayingResponse;
use crate::domain::playback::{NowPlayingEvent, PlaybackError};

/// `/nowplaying` 查询参数
///
/// 全部为可选，缺失的字段在转换为领域事件时报错；重复的参数只取第一个值
#[derive(Debug, Default)]
pub struct NowPlayingQuery {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    pub state: Option<String>,
}

impl FromIterator<(String, String)> for NowPlayingQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "artist" => &mut query.artist,
                "album" => &mut query.album,
                "track" => &mut query.track,
                "state" => &mut query.state,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

impl NowPlayingQuery {
    pub fn into_event(self) -> Result<NowPlayingEvent, PlaybackError> {
        NowPlayingEvent::new(
            self.artist.unwrap_or_default(),
            self.album.unwrap_or_default(),
            self.track.unwrap_or_default(),
            self.state.as_deref().unwrap_or_default(),
        )
    }
}

/// `/nowplaying` 成功响应
#[derive(Debug, Serialize)]
pub struct NowPlayingResponse {
    pub status: &'static str,
    pub artist: String,
    pub album: String,
    pub track: String,
    pub state: &'static str,
    pub path: String,
}

impl From<ShowNowPlayingResponse> for NowPlayingResponse {
    fn from(response: ShowNowPlayingResponse) -> Self {
        let event = response.event;
        Self {
            status: "ok",
            artist: event.artist().to_string(),
            album: event.album().to_string(),
            track: event.track().to_string(),
            state: event.state().as_str(),
            path: response.artwork.path().display().to_string(),
        }
    }
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
