//! Fake Artwork Source - 用于测试的数据源
//!
//! 返回预设结果并记录调用次数，不访问网络

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{ArtworkSourcePort, SourceError};
use crate::domain::artwork::ArtworkRequest;

/// 预设行为
#[derive(Debug, Clone)]
enum FakeBehavior {
    Succeed(Vec<u8>),
    NotFound,
    Unreachable,
}

/// Fake Artwork Source
pub struct FakeArtworkSource {
    name: &'static str,
    behavior: Mutex<FakeBehavior>,
    /// 模拟网络延迟
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeArtworkSource {
    fn with_behavior(name: &'static str, behavior: FakeBehavior) -> Self {
        Self {
            name,
            behavior: Mutex::new(behavior),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 总是返回给定字节
    pub fn succeeding(name: &'static str, data: &[u8]) -> Self {
        Self::with_behavior(name, FakeBehavior::Succeed(data.to_vec()))
    }

    /// 总是返回 NotFound
    pub fn not_found(name: &'static str) -> Self {
        Self::with_behavior(name, FakeBehavior::NotFound)
    }

    /// 总是返回 Transport 错误
    pub fn unreachable(name: &'static str) -> Self {
        Self::with_behavior(name, FakeBehavior::Unreachable)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 之后的调用全部返回 Transport 错误
    pub fn fail_unreachable(&self) {
        if let Ok(mut behavior) = self.behavior.lock() {
            *behavior = FakeBehavior::Unreachable;
        }
    }

    /// 已被调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtworkSourcePort for FakeArtworkSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_artwork(&self, request: &ArtworkRequest) -> Result<Vec<u8>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let behavior = self
            .behavior
            .lock()
            .map(|b| b.clone())
            .unwrap_or(FakeBehavior::Unreachable);

        tracing::debug!(
            source = self.name,
            artwork = %request,
            ?behavior,
            "FakeArtworkSource called"
        );

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match behavior {
            FakeBehavior::Succeed(data) => Ok(data),
            FakeBehavior::NotFound => Err(SourceError::NotFound(format!(
                "{}: no artwork for '{}'",
                self.name, request
            ))),
            FakeBehavior::Unreachable => Err(SourceError::Transport(format!(
                "{}: connection refused",
                self.name
            ))),
        }
    }
}
