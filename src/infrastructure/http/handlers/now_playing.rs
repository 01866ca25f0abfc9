//! Now Playing HTTP Handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::ShowNowPlaying;
use crate::infrastructure::http::dto::{NowPlayingQuery, NowPlayingResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 播放状态通知
///
/// 解析封面并显示，返回实际显示的图片路径。
/// 处理在独立任务中执行，客户端断开不会中断进行中的下载或渲染。
pub async fn now_playing(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<NowPlayingResponse>, ApiError> {
    let event = NowPlayingQuery::from_iter(pairs).into_event().map_err(|e| {
        tracing::debug!(error = %e, "Rejected now-playing request");
        ApiError::usage()
    })?;

    let handler = state.show_now_playing_handler.clone();
    let response = tokio::spawn(async move { handler.handle(ShowNowPlaying { event }).await })
        .await
        .map_err(|e| ApiError::Internal(format!("Now-playing task failed: {}", e)))??;

    Ok(Json(response.into()))
}
