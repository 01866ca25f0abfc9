//! 封面查询命令行工具
//!
//! 使用与服务相同的配置、数据源和缓存解析封面，打印图片路径和来源，不渲染

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use supper::application::{ArtworkSourcePort, ResolveArtwork, ResolveArtworkHandler};
use supper::config::load_config_from_path;
use supper::infrastructure::adapters::{ItunesClient, MusicBrainzClient};
use supper::infrastructure::persistence::disk::FileArtworkCache;

#[derive(Parser)]
#[command(name = "supper-artwork")]
#[command(version)]
#[command(about = "Resolve album artwork and print the cached image path")]
struct Args {
    /// Artist name
    artist: String,

    /// Album name
    album: String,

    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config_from_path(args.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let sources: Vec<Arc<dyn ArtworkSourcePort>> = vec![
        Arc::new(ItunesClient::new(config.artwork.itunes_config())?),
        Arc::new(MusicBrainzClient::new(config.artwork.musicbrainz_config())?),
    ];
    let cache = Arc::new(FileArtworkCache::with_config(&config.artwork.cache_config()).await?);
    let resolver = ResolveArtworkHandler::new(sources, cache, config.artwork.fallback_image);

    let resolved = resolver
        .handle(ResolveArtwork::new(args.artist, args.album))
        .await;

    println!("{}", resolved.path().display());
    eprintln!("source: {}", resolved.origin());

    Ok(())
}
