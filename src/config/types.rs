//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::display::{DisplayError, Rotation};
use crate::infrastructure::adapters::{
    FramebufferConfig, ItunesClientConfig, MusicBrainzClientConfig, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::infrastructure::persistence::disk::FileCacheConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 显示配置
    #[serde(default)]
    pub display: DisplayConfig,

    /// 封面解析配置
    #[serde(default)]
    pub artwork: ArtworkConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 显示配置
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// 旋转角度（逆时针，90 的倍数）
    #[serde(default)]
    pub rotation: i32,

    /// 屏幕宽度（像素）
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// 屏幕高度（像素）
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    /// 帧缓冲设备路径
    #[serde(default = "default_framebuffer")]
    pub framebuffer: PathBuf,

    /// 开机画面
    #[serde(default = "default_boot_image")]
    pub boot_image: PathBuf,
}

fn default_screen_width() -> u32 {
    480
}

fn default_screen_height() -> u32 {
    320
}

fn default_framebuffer() -> PathBuf {
    PathBuf::from("/dev/fb1")
}

fn default_boot_image() -> PathBuf {
    PathBuf::from("assets/boot.png")
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotation: 0,
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            framebuffer: default_framebuffer(),
            boot_image: default_boot_image(),
        }
    }
}

impl DisplayConfig {
    /// 转换为渲染器配置
    pub fn framebuffer_config(&self) -> Result<FramebufferConfig, DisplayError> {
        Ok(FramebufferConfig {
            rotation: Rotation::from_degrees(self.rotation)?,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            framebuffer: self.framebuffer.clone(),
        })
    }
}

/// 封面解析配置
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkConfig {
    /// 缓存目录
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// 所有数据源失败时使用的静态图片
    #[serde(default = "default_fallback_image")]
    pub fallback_image: PathBuf,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// iTunes 商店国家代码
    #[serde(default = "default_country")]
    pub country: String,

    #[serde(default = "default_itunes_search_url")]
    pub itunes_search_url: String,

    #[serde(default = "default_itunes_lookup_url")]
    pub itunes_lookup_url: String,

    #[serde(default = "default_musicbrainz_url")]
    pub musicbrainz_url: String,

    #[serde(default = "default_coverart_url")]
    pub coverart_url: String,

    /// HTTP User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// 同一 key 的并发请求只下载一次
    #[serde(default)]
    pub single_flight: bool,

    /// 最大缓存大小（字节），0 表示不限制
    ///
    /// 一分钟内写入的文件不会被清理，避免删除其他请求正要显示的封面
    #[serde(default)]
    pub max_cache_bytes: u64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_fallback_image() -> PathBuf {
    PathBuf::from("assets/fallback.png")
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_country() -> String {
    "us".to_string()
}

fn default_itunes_search_url() -> String {
    "https://itunes.apple.com/search".to_string()
}

fn default_itunes_lookup_url() -> String {
    "https://itunes.apple.com/lookup".to_string()
}

fn default_musicbrainz_url() -> String {
    "https://musicbrainz.org/ws/2/release-group".to_string()
}

fn default_coverart_url() -> String {
    "https://coverartarchive.org/release-group".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            fallback_image: default_fallback_image(),
            timeout_secs: default_timeout(),
            country: default_country(),
            itunes_search_url: default_itunes_search_url(),
            itunes_lookup_url: default_itunes_lookup_url(),
            musicbrainz_url: default_musicbrainz_url(),
            coverart_url: default_coverart_url(),
            user_agent: default_user_agent(),
            single_flight: false,
            max_cache_bytes: 0,
        }
    }
}

impl ArtworkConfig {
    pub fn itunes_config(&self) -> ItunesClientConfig {
        ItunesClientConfig {
            search_url: self.itunes_search_url.clone(),
            lookup_url: self.itunes_lookup_url.clone(),
            country: self.country.clone(),
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn musicbrainz_config(&self) -> MusicBrainzClientConfig {
        MusicBrainzClientConfig {
            search_url: self.musicbrainz_url.clone(),
            coverart_url: self.coverart_url.clone(),
            timeout_secs: self.timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn cache_config(&self) -> FileCacheConfig {
        FileCacheConfig {
            cache_dir: self.cache_dir.clone(),
            max_size_bytes: self.max_cache_bytes,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
