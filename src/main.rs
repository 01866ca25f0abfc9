//! Supper - 正在播放封面显示
//!
//! 启动流程：加载配置 → 初始化日志 → 构建组件 → 显示开机画面 → 监听播放通知

use std::sync::Arc;

use supper::application::{
    ArtworkSourcePort, ResolveArtworkHandler, ShowImage, ShowImageHandler,
};
use supper::config::{load_config, print_config, LogConfig};
use supper::infrastructure::adapters::{FramebufferRenderer, ItunesClient, MusicBrainzClient};
use supper::infrastructure::http::{AppState, HttpServer};
use supper::infrastructure::persistence::disk::FileArtworkCache;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},supper={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Supper - now playing artwork display");
    print_config(&config);

    // 封面数据源，按尝试顺序排列
    let sources: Vec<Arc<dyn ArtworkSourcePort>> = vec![
        Arc::new(ItunesClient::new(config.artwork.itunes_config())?),
        Arc::new(MusicBrainzClient::new(config.artwork.musicbrainz_config())?),
    ];

    let cache = Arc::new(FileArtworkCache::with_config(&config.artwork.cache_config()).await?);

    let resolver = Arc::new(
        ResolveArtworkHandler::new(sources, cache, config.artwork.fallback_image.clone())
            .with_single_flight(config.artwork.single_flight),
    );

    let framebuffer_config = config.display.framebuffer_config()?;
    let renderer = Arc::new(FramebufferRenderer::new(framebuffer_config));

    // 开机画面失败不影响启动
    let boot = ShowImageHandler::new(renderer.clone());
    if let Err(e) = boot
        .handle(ShowImage {
            path: config.display.boot_image.clone(),
        })
        .await
    {
        tracing::warn!(
            error = %e,
            path = %config.display.boot_image.display(),
            "Failed to show boot image"
        );
    }

    let state = AppState::new(resolver, renderer);
    let server = HttpServer::new(config.server.clone(), state);

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
