//! MusicBrainz Client - release-group 搜索 + Cover Art Archive
//!
//! 实现 ArtworkSourcePort trait
//!
//! 外部 API:
//! GET https://musicbrainz.org/ws/2/release-group?query=artist:"..." AND release:"..."&fmt=json&limit=1
//! GET https://coverartarchive.org/release-group/{mbid}/front-600.jpg
//!
//! 不做二次名称校验，直接信任搜索服务的相关性排序

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{build_http_client, download_image, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::application::ports::{ArtworkSourcePort, SourceError};
use crate::domain::artwork::ArtworkRequest;

/// 封面尺寸变体
const COVER_VARIANT: &str = "front-600";

/// release-group 搜索响应
#[derive(Debug, Deserialize)]
struct ReleaseGroupSearchResponse {
    #[serde(rename = "release-groups", default)]
    release_groups: Vec<ReleaseGroup>,
}

#[derive(Debug, Deserialize)]
struct ReleaseGroup {
    id: String,
}

/// MusicBrainz 客户端配置
#[derive(Debug, Clone)]
pub struct MusicBrainzClientConfig {
    /// release-group 搜索 URL
    pub search_url: String,
    /// Cover Art Archive release-group 根 URL
    pub coverart_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for MusicBrainzClientConfig {
    fn default() -> Self {
        Self {
            search_url: "https://musicbrainz.org/ws/2/release-group".to_string(),
            coverart_url: "https://coverartarchive.org/release-group".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl MusicBrainzClientConfig {
    pub fn new(search_url: impl Into<String>, coverart_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            coverart_url: coverart_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MusicBrainz / Cover Art Archive 客户端
pub struct MusicBrainzClient {
    client: Client,
    config: MusicBrainzClientConfig,
}

impl MusicBrainzClient {
    pub fn new(config: MusicBrainzClientConfig) -> Result<Self, SourceError> {
        let client = build_http_client(config.timeout_secs, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// 查找最相关的 release-group MBID
    async fn search_release_group(&self, request: &ArtworkRequest) -> Result<String, SourceError> {
        let query = build_search_query(request);

        let response = self
            .client
            .get(&self.config.search_url)
            .query(&[("query", query.as_str()), ("fmt", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: ReleaseGroupSearchResponse = response.json().await?;

        body.release_groups
            .into_iter()
            .next()
            .map(|group| group.id)
            .ok_or_else(|| {
                SourceError::NotFound(format!("No MusicBrainz release-group for '{}'", request))
            })
    }

    fn cover_url(&self, mbid: &str) -> String {
        format!(
            "{}/{}/{}.jpg",
            self.config.coverart_url.trim_end_matches('/'),
            mbid,
            COVER_VARIANT
        )
    }
}

/// Lucene 短语转义
fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `artist:"..." AND release:"..."`
fn build_search_query(request: &ArtworkRequest) -> String {
    format!(
        "artist:\"{}\" AND release:\"{}\"",
        escape_phrase(&request.artist),
        escape_phrase(&request.album)
    )
}

#[async_trait]
impl ArtworkSourcePort for MusicBrainzClient {
    fn name(&self) -> &'static str {
        "musicbrainz"
    }

    async fn fetch_artwork(&self, request: &ArtworkRequest) -> Result<Vec<u8>, SourceError> {
        let mbid = self.search_release_group(request).await?;
        let cover_url = self.cover_url(&mbid);

        tracing::debug!(
            artwork = %request,
            mbid = %mbid,
            url = %cover_url,
            "MusicBrainz release-group found"
        );

        download_image(&self.client, &cover_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_server;
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    const MBID: &str = "b8a7c51f-362c-4dcb-a259-bc6e0095f0a6";

    #[test]
    fn test_config_default() {
        let config = MusicBrainzClientConfig::default();
        assert_eq!(config.search_url, "https://musicbrainz.org/ws/2/release-group");
        assert_eq!(config.coverart_url, "https://coverartarchive.org/release-group");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_search_query_quotes_both_terms() {
        let request = ArtworkRequest::new("Portishead", "Dummy");
        assert_eq!(
            build_search_query(&request),
            r#"artist:"Portishead" AND release:"Dummy""#
        );
    }

    #[test]
    fn test_search_query_escapes_quotes() {
        let request = ArtworkRequest::new("The \"Band\"", r"A\B");
        assert_eq!(
            build_search_query(&request),
            r#"artist:"The \"Band\"" AND release:"A\\B""#
        );
    }

    #[test]
    fn test_cover_url() {
        let client = MusicBrainzClient::new(MusicBrainzClientConfig::default()).unwrap();
        assert_eq!(
            client.cover_url(MBID),
            format!("https://coverartarchive.org/release-group/{}/front-600.jpg", MBID)
        );
    }

    /// 模拟 MusicBrainz + CAA：只认识 Portishead - Dummy
    async fn spawn_fake_musicbrainz(cover_status: StatusCode) -> MusicBrainzClientConfig {
        let (listener, base_url) = test_server::bind().await;

        let router = Router::new()
            .route(
                "/ws/2/release-group",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    assert_eq!(params.get("fmt").map(String::as_str), Some("json"));
                    assert_eq!(params.get("limit").map(String::as_str), Some("1"));
                    let query = params.get("query").cloned().unwrap_or_default();
                    if query == r#"artist:"Portishead" AND release:"Dummy""# {
                        Json(json!({
                            "count": 1,
                            "release-groups": [{ "id": MBID, "score": 100 }]
                        }))
                    } else {
                        Json(json!({ "count": 0, "release-groups": [] }))
                    }
                }),
            )
            .route(
                "/release-group/:mbid/:file",
                get(move |Path((mbid, file)): Path<(String, String)>| async move {
                    assert_eq!(mbid, MBID);
                    assert_eq!(file, "front-600.jpg");
                    (cover_status, b"cover".to_vec())
                }),
            );

        test_server::serve(listener, router);

        MusicBrainzClientConfig::new(
            format!("{}/ws/2/release-group", base_url),
            format!("{}/release-group", base_url),
        )
    }

    #[tokio::test]
    async fn test_fetch_artwork() {
        let config = spawn_fake_musicbrainz(StatusCode::OK).await;
        let client = MusicBrainzClient::new(config).unwrap();

        let data = client
            .fetch_artwork(&ArtworkRequest::new("Portishead", "Dummy"))
            .await
            .unwrap();

        assert_eq!(data, b"cover");
    }

    #[tokio::test]
    async fn test_no_release_group_is_not_found() {
        let config = spawn_fake_musicbrainz(StatusCode::OK).await;
        let client = MusicBrainzClient::new(config).unwrap();

        let result = client
            .fetch_artwork(&ArtworkRequest::new("Portishead", "Third Album"))
            .await;

        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_cover_is_transport_error() {
        let config = spawn_fake_musicbrainz(StatusCode::NOT_FOUND).await;
        let client = MusicBrainzClient::new(config).unwrap();

        let result = client
            .fetch_artwork(&ArtworkRequest::new("Portishead", "Dummy"))
            .await;

        assert!(matches!(result, Err(SourceError::Transport(_))));
    }
}
