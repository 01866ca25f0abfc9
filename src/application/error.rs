//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{CacheError, RenderError, SourceError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 图像解码错误
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// 显示设备写入错误
    #[error("Display error: {0}")]
    DisplayError(String),
}

impl From<SourceError> for ApplicationError {
    fn from(err: SourceError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<RenderError> for ApplicationError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Decode(msg) => Self::DecodeError(msg),
            RenderError::Io(msg) => Self::DisplayError(msg),
        }
    }
}
