//! iTunes Client - iTunes Search API 两步查询
//!
//! 实现 ArtworkSourcePort trait
//!
//! 外部 API:
//! GET https://itunes.apple.com/search?term=..&entity=musicArtist&limit=1&country=us
//! GET https://itunes.apple.com/lookup?id=..&entity=album&limit=200&country=us
//! 第一条 lookup 结果是艺术家本身，其余为专辑；artworkUrl100 中的 100x100 替换为 600x600

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{build_http_client, download_image, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::application::ports::{ArtworkSourcePort, SourceError};
use crate::domain::artwork::{normalize_identity, ArtworkRequest};

/// 专辑列表上限，覆盖大型唱片目录
const ALBUM_LOOKUP_LIMIT: u32 = 200;

/// 低分辨率尺寸标记
const LOW_RES_TOKEN: &str = "100x100";
/// 高分辨率尺寸标记
const HIGH_RES_TOKEN: &str = "600x600";

/// 艺术家搜索响应
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ArtistRecord>,
}

#[derive(Debug, Deserialize)]
struct ArtistRecord {
    #[serde(rename = "artistId")]
    artist_id: Option<u64>,
}

/// 专辑 lookup 响应
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<CollectionRecord>,
}

#[derive(Debug, Deserialize)]
struct CollectionRecord {
    #[serde(rename = "collectionName")]
    collection_name: Option<String>,
    #[serde(rename = "artworkUrl100")]
    artwork_url: Option<String>,
}

/// iTunes 客户端配置
#[derive(Debug, Clone)]
pub struct ItunesClientConfig {
    /// 搜索接口 URL
    pub search_url: String,
    /// lookup 接口 URL
    pub lookup_url: String,
    /// 商店国家代码
    pub country: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ItunesClientConfig {
    fn default() -> Self {
        Self {
            search_url: "https://itunes.apple.com/search".to_string(),
            lookup_url: "https://itunes.apple.com/lookup".to_string(),
            country: "us".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ItunesClientConfig {
    /// 以同一个 base URL 构造 search / lookup 地址
    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref().trim_end_matches('/');
        Self {
            search_url: format!("{}/search", base_url),
            lookup_url: format!("{}/lookup", base_url),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// iTunes 客户端
pub struct ItunesClient {
    client: Client,
    config: ItunesClientConfig,
}

impl ItunesClient {
    pub fn new(config: ItunesClientConfig) -> Result<Self, SourceError> {
        let client = build_http_client(config.timeout_secs, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// 第一步：按名称查找艺术家 ID
    async fn fetch_artist_id(&self, artist: &str) -> Result<u64, SourceError> {
        let response = self
            .client
            .get(&self.config.search_url)
            .query(&[
                ("term", artist),
                ("entity", "musicArtist"),
                ("limit", "1"),
                ("country", self.config.country.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;

        body.results
            .into_iter()
            .next()
            .and_then(|record| record.artist_id)
            .ok_or_else(|| {
                SourceError::NotFound(format!("No iTunes artist match for '{}'", artist))
            })
    }

    /// 第二步：列出艺术家的全部专辑（去掉第一条艺术家记录）
    async fn fetch_albums(&self, artist_id: u64) -> Result<Vec<CollectionRecord>, SourceError> {
        let id = artist_id.to_string();
        let limit = ALBUM_LOOKUP_LIMIT.to_string();
        let response = self
            .client
            .get(&self.config.lookup_url)
            .query(&[
                ("id", id.as_str()),
                ("entity", "album"),
                ("limit", limit.as_str()),
                ("country", self.config.country.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: LookupResponse = response.json().await?;
        Ok(body.results.into_iter().skip(1).collect())
    }
}

/// 在专辑列表中查找规范化后名称完全相同的专辑，返回其封面 URL
///
/// 第一个精确匹配生效；匹配但没有封面 URL 视为未找到
fn find_album_artwork<'a>(
    albums: &'a [CollectionRecord],
    album: &str,
) -> Result<&'a str, SourceError> {
    let target = normalize_identity(album);

    let matched = albums
        .iter()
        .find(|record| {
            record
                .collection_name
                .as_deref()
                .is_some_and(|name| normalize_identity(name) == target)
        })
        .ok_or_else(|| {
            SourceError::NotFound(format!("No exact iTunes album match for '{}'", album))
        })?;

    matched
        .artwork_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| SourceError::NotFound(format!("No artwork URL for '{}'", album)))
}

/// 100x100 → 600x600，纯字符串替换；没有该标记时保持原样
fn upgrade_artwork_url(url: &str) -> String {
    url.replace(LOW_RES_TOKEN, HIGH_RES_TOKEN)
}

#[async_trait]
impl ArtworkSourcePort for ItunesClient {
    fn name(&self) -> &'static str {
        "itunes"
    }

    async fn fetch_artwork(&self, request: &ArtworkRequest) -> Result<Vec<u8>, SourceError> {
        let artist_id = self.fetch_artist_id(&request.artist).await?;
        tracing::debug!(artist = %request.artist, artist_id, "iTunes artist found");

        let albums = self.fetch_albums(artist_id).await?;
        let artwork_url = upgrade_artwork_url(find_album_artwork(&albums, &request.album)?);

        tracing::debug!(
            artwork = %request,
            albums = albums.len(),
            url = %artwork_url,
            "iTunes album matched"
        );

        download_image(&self.client, &artwork_url).await
    }
}
