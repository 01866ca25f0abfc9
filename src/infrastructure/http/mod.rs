//! HTTP Layer - 播放状态通知接口
//!
//! 播放器在曲目或状态变化时调用 `/nowplaying`

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::HttpServer;
pub use state::AppState;
