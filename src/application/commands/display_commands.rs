//! Display Commands

use std::path::PathBuf;

use crate::application::queries::ResolvedArtwork;
use crate::domain::playback::NowPlayingEvent;

/// 直接显示一张本地图片（开机画面等）
#[derive(Debug, Clone)]
pub struct ShowImage {
    pub path: PathBuf,
}

/// 显示当前播放专辑的封面
#[derive(Debug, Clone)]
pub struct ShowNowPlaying {
    pub event: NowPlayingEvent,
}

#[derive(Debug, Clone)]
pub struct ShowNowPlayingResponse {
    pub event: NowPlayingEvent,
    pub artwork: ResolvedArtwork,
}
