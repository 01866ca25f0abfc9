//! Artwork Cache Port - 封面磁盘缓存
//!
//! 以 CacheKey 命名的扁平目录，文件存在即缓存命中，没有索引或元数据文件

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::artwork::CacheKey;

/// Artwork Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::IoError(e.to_string())
    }
}

/// Artwork Cache Port
#[async_trait]
pub trait ArtworkCachePort: Send + Sync {
    /// key 对应的缓存文件路径（不检查是否存在）
    fn path_for(&self, key: &CacheKey) -> PathBuf;

    /// 查找缓存，命中时返回文件路径
    async fn lookup(&self, key: &CacheKey) -> Option<PathBuf>;

    /// 写入缓存
    ///
    /// 返回时文件已完整写入并关闭；读者不会看到写了一半的文件
    async fn store(&self, key: &CacheKey, data: &[u8]) -> Result<PathBuf, CacheError>;
}
