//! File Artwork Cache - 文件系统封面缓存
//!
//! 实现 ArtworkCachePort trait
//!
//! 目录布局：`<cache_dir>/<sha1-hex>.jpg`，无子目录、无元数据文件。
//! 写入流程：临时文件 → fsync → rename，读者只会看到完整文件。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::ports::{ArtworkCachePort, CacheError};
use crate::domain::artwork::{CacheKey, CACHE_EXTENSION};

/// 最近写入的文件不参与清理：其他请求可能刚拿到它的路径还未显示
const PRUNE_GRACE: Duration = Duration::from_secs(60);

/// 文件缓存配置
#[derive(Debug, Clone)]
pub struct FileCacheConfig {
    /// 缓存目录
    pub cache_dir: PathBuf,
    /// 最大缓存大小（字节），0 表示不限制（永不删除）
    ///
    /// 清理只删除修改时间早于宽限期的文件，因此总大小可能暂时超过上限
    pub max_size_bytes: u64,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            max_size_bytes: 0,
        }
    }
}

/// 文件系统封面缓存
pub struct FileArtworkCache {
    cache_dir: PathBuf,
    max_size_bytes: u64,
}

impl FileArtworkCache {
    /// 创建不限大小的缓存
    pub async fn new(cache_dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        Self::with_config(&FileCacheConfig {
            cache_dir: cache_dir.as_ref().to_path_buf(),
            max_size_bytes: 0,
        })
        .await
    }

    pub async fn with_config(config: &FileCacheConfig) -> Result<Self, CacheError> {
        // 确保目录存在
        fs::create_dir_all(&config.cache_dir).await?;

        tracing::info!(
            cache_dir = %config.cache_dir.display(),
            max_size_bytes = config.max_size_bytes,
            "FileArtworkCache initialized"
        );

        Ok(Self {
            cache_dir: config.cache_dir.clone(),
            max_size_bytes: config.max_size_bytes,
        })
    }

    /// 获取缓存目录
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// 每个写入者独立的临时文件，与缓存文件在同一目录以保证 rename 原子性
    fn temp_path_for(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()))
    }

    async fn write_atomic(temp_path: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(temp_path, target).await
    }

    /// 删除最旧的缓存文件直到总大小不超过上限
    ///
    /// `keep` 和宽限期内写入的文件永不删除
    async fn prune(&self, keep: &Path) -> Result<u64, CacheError> {
        let cutoff = SystemTime::now()
            .checked_sub(PRUNE_GRACE)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut entries: Vec<(PathBuf, u64, SystemTime)> = Vec::new();
        let mut total = 0u64;

        let mut dir = fs::read_dir(&self.cache_dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != CACHE_EXTENSION) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            total += metadata.len();
            entries.push((path, metadata.len(), modified));
        }

        if total <= self.max_size_bytes {
            return Ok(0);
        }

        entries.sort_by_key(|(_, _, modified)| *modified);

        let mut removed = 0u64;
        for (path, size, modified) in entries {
            if total <= self.max_size_bytes {
                break;
            }
            if path == keep || modified > cutoff {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => {
                    total = total.saturating_sub(size);
                    removed += 1;
                }
                // 并发清理时可能已被删除
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            removed,
            remaining_bytes = total,
            max_size_bytes = self.max_size_bytes,
            "Artwork cache pruned"
        );

        Ok(removed)
    }
}

#[async_trait]
impl ArtworkCachePort for FileArtworkCache {
    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    async fn lookup(&self, key: &CacheKey) -> Option<PathBuf> {
        let path = self.path_for(key);
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Some(path),
            _ => None,
        }
    }

    async fn store(&self, key: &CacheKey, data: &[u8]) -> Result<PathBuf, CacheError> {
        let target = self.path_for(key);
        let temp_path = self.temp_path_for(key);

        if let Err(e) = Self::write_atomic(&temp_path, &target, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            key = %key,
            size = data.len(),
            path = %target.display(),
            "Artwork cache entry written"
        );

        if self.max_size_bytes > 0 {
            if let Err(e) = self.prune(&target).await {
                tracing::warn!(error = %e, "Artwork cache pruning failed");
            }
        }

        Ok(target)
    }
}
