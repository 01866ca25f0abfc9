//! Disk Persistence

mod artwork_cache;

pub use artwork_cache::{FileArtworkCache, FileCacheConfig};
