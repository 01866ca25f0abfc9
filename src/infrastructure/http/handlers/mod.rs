//! HTTP Handlers

mod now_playing;
mod ping;

pub use now_playing::*;
pub use ping::*;
