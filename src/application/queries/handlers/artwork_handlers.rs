//! Artwork Query Handlers
//!
//! 封面解析状态机:
//!
//! ```text
//! CACHE_LOOKUP ─┬─ HIT ──────────────────────────────► Cached
//!               └─ MISS ─► source[0] ─┬─ ok ─────────► Fetched
//!                                      └─ err ─► source[1] ─┬─ ok ─► Fetched
//!                                                            └─ err ─► Fallback
//! ```
//!
//! 每一步都是 `Result`，失败只推动状态前进，从不向调用方返回错误。

use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::error::ApplicationError;
use crate::application::ports::{ArtworkCachePort, ArtworkSourcePort};
use crate::application::queries::artwork_queries::{ResolveArtwork, ResolvedArtwork};
use crate::domain::artwork::{ArtworkRequest, CacheKey};

/// ResolveArtwork Handler - 封面解析器
///
/// 并发安全：同一 key 的并发 miss 默认允许重复下载（写入是原子的）；
/// 开启 single-flight 后同一 key 的请求串行执行，后到者变为缓存命中。
pub struct ResolveArtworkHandler {
    sources: Vec<Arc<dyn ArtworkSourcePort>>,
    cache: Arc<dyn ArtworkCachePort>,
    fallback_path: PathBuf,
    /// key -> 进行中的解析锁（None 表示关闭 single-flight）
    inflight: Option<DashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl ResolveArtworkHandler {
    /// `sources` 按尝试顺序排列
    pub fn new(
        sources: Vec<Arc<dyn ArtworkSourcePort>>,
        cache: Arc<dyn ArtworkCachePort>,
        fallback_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sources,
            cache,
            fallback_path: fallback_path.into(),
            inflight: None,
        }
    }

    /// 开启/关闭 single-flight
    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.inflight = enabled.then(DashMap::new);
        self
    }

    pub async fn handle(&self, query: ResolveArtwork) -> ResolvedArtwork {
        let request = query.request;
        let key = request.cache_key();

        if let Some(path) = self.cache.lookup(&key).await {
            tracing::debug!(key = %key, artwork = %request, "Artwork cache hit");
            return ResolvedArtwork::Cached(path);
        }

        match &self.inflight {
            Some(inflight) => self.resolve_single_flight(inflight, &request, &key).await,
            None => self.resolve_miss(&request, &key).await,
        }
    }

    async fn resolve_single_flight(
        &self,
        inflight: &DashMap<CacheKey, Arc<Mutex<()>>>,
        request: &ArtworkRequest,
        key: &CacheKey,
    ) -> ResolvedArtwork {
        let lock = inflight.entry(key.clone()).or_default().clone();

        let resolved = {
            let _guard = lock.lock().await;
            // 等待期间可能已被其他请求写入
            match self.cache.lookup(key).await {
                Some(path) => {
                    tracing::debug!(key = %key, "Artwork resolved by concurrent request");
                    ResolvedArtwork::Cached(path)
                }
                None => self.resolve_miss(request, key).await,
            }
        };

        drop(lock);
        inflight.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);

        resolved
    }

    async fn resolve_miss(&self, request: &ArtworkRequest, key: &CacheKey) -> ResolvedArtwork {
        tracing::info!(key = %key, artwork = %request, "Artwork cache miss, downloading");

        for source in &self.sources {
            match self.try_source(source.as_ref(), request, key).await {
                Ok(path) => {
                    tracing::info!(
                        key = %key,
                        source = source.name(),
                        path = %path.display(),
                        "Artwork saved to cache"
                    );
                    return ResolvedArtwork::Fetched {
                        path,
                        source: source.name(),
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        source = source.name(),
                        error = %e,
                        "Artwork source failed"
                    );
                }
            }
        }

        tracing::warn!(
            artwork = %request,
            fallback = %self.fallback_path.display(),
            "All artwork sources failed, using fallback"
        );
        ResolvedArtwork::Fallback(self.fallback_path.clone())
    }

    /// 单个数据源：下载 → 写缓存
    async fn try_source(
        &self,
        source: &dyn ArtworkSourcePort,
        request: &ArtworkRequest,
        key: &CacheKey,
    ) -> Result<PathBuf, ApplicationError> {
        let data = source.fetch_artwork(request).await?;
        let path = self.cache.store(key, &data).await?;
        Ok(path)
    }
}
