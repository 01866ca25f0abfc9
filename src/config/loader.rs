//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::display::Rotation;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SUPPER_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SUPPER_SERVER__PORT=8080`
/// - `SUPPER_DISPLAY__ROTATION=90`
/// - `SUPPER_DISPLAY__FRAMEBUFFER=/dev/fb0`
/// - `SUPPER_ARTWORK__CACHE_DIR=/var/cache/supper`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("display.rotation", 0)?
        .set_default("display.screen_width", 480)?
        .set_default("display.screen_height", 320)?
        .set_default("display.framebuffer", "/dev/fb1")?
        .set_default("display.boot_image", "assets/boot.png")?
        .set_default("artwork.cache_dir", "cache")?
        .set_default("artwork.fallback_image", "assets/fallback.png")?
        .set_default("artwork.timeout_secs", 5)?
        .set_default("artwork.country", "us")?
        .set_default("artwork.single_flight", false)?
        .set_default("artwork.max_cache_bytes", 0)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SUPPER_ARTWORK__TIMEOUT_SECS=10
    builder = builder.add_source(
        Environment::with_prefix("SUPPER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    Rotation::from_degrees(config.display.rotation)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    if config.display.screen_width == 0 || config.display.screen_height == 0 {
        return Err(ConfigError::ValidationError(
            "Screen dimensions must be positive".to_string(),
        ));
    }

    if config.display.framebuffer.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Framebuffer path cannot be empty".to_string(),
        ));
    }

    if config.artwork.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Artwork timeout cannot be 0".to_string(),
        ));
    }

    if config.artwork.cache_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache directory cannot be empty".to_string(),
        ));
    }

    for (name, url) in [
        ("itunes_search_url", &config.artwork.itunes_search_url),
        ("itunes_lookup_url", &config.artwork.itunes_lookup_url),
        ("musicbrainz_url", &config.artwork.musicbrainz_url),
        ("coverart_url", &config.artwork.coverart_url),
    ] {
        if url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "artwork.{} cannot be empty",
                name
            )));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "Display: {}x{} rotation={} on {:?}",
        config.display.screen_width,
        config.display.screen_height,
        config.display.rotation,
        config.display.framebuffer
    );
    tracing::info!("Boot Image: {:?}", config.display.boot_image);
    tracing::info!("Cache Directory: {:?}", config.artwork.cache_dir);
    tracing::info!("Fallback Image: {:?}", config.artwork.fallback_image);
    tracing::info!("Source Timeout: {}s", config.artwork.timeout_secs);
    tracing::info!("iTunes Country: {}", config.artwork.country);
    tracing::info!("Single Flight: {}", config.artwork.single_flight);
    if config.artwork.max_cache_bytes > 0 {
        tracing::info!("Max Cache Size: {} bytes", config.artwork.max_cache_bytes);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
