//! HTTP Routes
//!
//! API Endpoints:
//! - /nowplaying   GET  播放状态通知（解析封面并显示）
//! - /ping         GET  健康检查
//!
//! 其余路径由 Router 默认返回 404

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/nowplaying", get(handlers::now_playing))
        .route("/ping", get(handlers::ping))
}
