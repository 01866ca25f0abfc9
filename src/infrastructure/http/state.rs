//! Application State
//!
//! 包含 HTTP handlers 共享的 Command Handlers

use std::sync::Arc;

use crate::application::{DisplayPort, ResolveArtworkHandler, ShowNowPlayingHandler};

/// 应用状态
pub struct AppState {
    /// 在独立任务中执行，需要 Arc 共享
    pub show_now_playing_handler: Arc<ShowNowPlayingHandler>,
}

impl AppState {
    /// 创建应用状态
    pub fn new(resolver: Arc<ResolveArtworkHandler>, display: Arc<dyn DisplayPort>) -> Self {
        Self {
            show_now_playing_handler: Arc::new(ShowNowPlayingHandler::new(resolver, display)),
        }
    }
}
