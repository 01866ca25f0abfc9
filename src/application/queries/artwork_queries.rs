//! Artwork Queries

use std::path::{Path, PathBuf};

use crate::domain::artwork::ArtworkRequest;

/// 解析封面
#[derive(Debug, Clone)]
pub struct ResolveArtwork {
    pub request: ArtworkRequest,
}

impl ResolveArtwork {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            request: ArtworkRequest::new(artist, album),
        }
    }
}

/// 封面解析结果，三种情况恰好返回其一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedArtwork {
    /// 缓存命中
    Cached(PathBuf),
    /// 从数据源下载并写入缓存
    Fetched { path: PathBuf, source: &'static str },
    /// 所有数据源失败，返回静态回退图片（不写缓存）
    Fallback(PathBuf),
}

impl ResolvedArtwork {
    pub fn path(&self) -> &Path {
        match self {
            Self::Cached(path) | Self::Fallback(path) => path,
            Self::Fetched { path, .. } => path,
        }
    }

    /// 结果来源（用于日志 / 响应）
    pub fn origin(&self) -> &'static str {
        match self {
            Self::Cached(_) => "cache",
            Self::Fetched { source, .. } => *source,
            Self::Fallback(_) => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
