//! Display Port - 图像渲染到显示设备

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 文件无法解析为图像
    #[error("Decode error: {0}")]
    Decode(String),

    /// 输出设备无法写入
    #[error("IO error: {0}")]
    Io(String),
}

/// Display Port
///
/// 并发调用时设备内容为最后一次完成的写入，不保证顺序
#[async_trait]
pub trait DisplayPort: Send + Sync {
    /// 解码并显示图像
    async fn display(&self, image_path: &Path) -> Result<(), RenderError>;
}
