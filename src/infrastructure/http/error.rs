//! HTTP Error Handling

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;

use super::dto::ErrorResponse;
use crate::application::ApplicationError;

/// `/nowplaying` 参数错误时返回的用法说明
pub const NOW_PLAYING_USAGE: &str =
    "Usage: /nowplaying?artist=...&album=...&track=...&state=playing|paused";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    /// 参数缺失或无效
    pub fn usage() -> Self {
        ApiError::BadRequest(NOW_PLAYING_USAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
