//! Artwork Source Port - 外部封面数据源抽象
//!
//! 每个数据源是一个独立、可替换的策略，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::artwork::ArtworkRequest;

/// 数据源错误
///
/// 对 Resolver 来说两种错误等价，都只会触发下一级回退
#[derive(Debug, Error)]
pub enum SourceError {
    /// 数据源中没有匹配的数据
    #[error("Not found: {0}")]
    NotFound(String),

    /// 网络失败或非成功状态码
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Transport(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            SourceError::Transport(format!("Cannot connect: {}", e))
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

/// Artwork Source Port
///
/// 单次尝试，不在内部重试
#[async_trait]
pub trait ArtworkSourcePort: Send + Sync {
    /// 数据源名称（用于日志）
    fn name(&self) -> &'static str;

    /// 获取封面图片字节
    async fn fetch_artwork(&self, request: &ArtworkRequest) -> Result<Vec<u8>, SourceError>;
}
