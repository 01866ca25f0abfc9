//! Artwork Source Adapters - 外部封面数据源
//!
//! - iTunes: 艺术家搜索 → 专辑列表 → 精确匹配 → 600x600 封面
//! - MusicBrainz + Cover Art Archive: release-group 搜索 → front-600 封面
//! - Fake: 测试用，返回预设结果

mod fake_source;
mod itunes_client;
mod musicbrainz_client;

pub use fake_source::FakeArtworkSource;
pub use itunes_client::{ItunesClient, ItunesClientConfig};
pub use musicbrainz_client::{MusicBrainzClient, MusicBrainzClientConfig};

use reqwest::Client;
use std::time::Duration;

use crate::application::ports::SourceError;

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// 默认 User-Agent（MusicBrainz 要求可识别的 UA）
pub const DEFAULT_USER_AGENT: &str = concat!("supper/", env!("CARGO_PKG_VERSION"));

/// 创建带超时和 User-Agent 的 HTTP 客户端
fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SourceError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()
        .map_err(|e| SourceError::Transport(e.to_string()))
}

/// 下载图片字节，非 2xx 视为传输错误
async fn download_image(client: &Client, url: &str) -> Result<Vec<u8>, SourceError> {
    tracing::debug!(url = %url, "Downloading artwork image");

    let response = client.get(url).send().await?.error_for_status()?;
    let data = response.bytes().await?.to_vec();

    tracing::debug!(url = %url, size = data.len(), "Artwork image downloaded");
    Ok(data)
}
