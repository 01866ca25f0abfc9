//! Display Command Handlers

use std::sync::Arc;

use crate::application::commands::display_commands::{
    ShowImage, ShowNowPlaying, ShowNowPlayingResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::DisplayPort;
use crate::application::queries::handlers::ResolveArtworkHandler;
use crate::application::queries::ResolveArtwork;

/// ShowImage Handler
pub struct ShowImageHandler {
    display: Arc<dyn DisplayPort>,
}

impl ShowImageHandler {
    pub fn new(display: Arc<dyn DisplayPort>) -> Self {
        Self { display }
    }

    pub async fn handle(&self, cmd: ShowImage) -> Result<(), ApplicationError> {
        self.display.display(&cmd.path).await?;
        tracing::info!(path = %cmd.path.display(), "Image displayed");
        Ok(())
    }
}

/// ShowNowPlaying Handler - 解析封面后渲染
///
/// 封面解析永不失败；只有渲染错误会返回给调用方
pub struct ShowNowPlayingHandler {
    resolver: Arc<ResolveArtworkHandler>,
    display: Arc<dyn DisplayPort>,
}

impl ShowNowPlayingHandler {
    pub fn new(resolver: Arc<ResolveArtworkHandler>, display: Arc<dyn DisplayPort>) -> Self {
        Self { resolver, display }
    }

    pub async fn handle(
        &self,
        cmd: ShowNowPlaying,
    ) -> Result<ShowNowPlayingResponse, ApplicationError> {
        let event = cmd.event;
        let artwork = self
            .resolver
            .handle(ResolveArtwork {
                request: event.artwork_request(),
            })
            .await;

        self.display.display(artwork.path()).await?;

        tracing::info!(
            artist = %event.artist(),
            album = %event.album(),
            track = %event.track(),
            state = %event.state(),
            origin = artwork.origin(),
            "Now playing artwork displayed"
        );

        Ok(ShowNowPlayingResponse { event, artwork })
    }
}
