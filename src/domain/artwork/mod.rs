//! Artwork Context - 专辑封面限界上下文
//!
//! 职责:
//! - 艺术家/专辑标识的规范化
//! - 确定性缓存 key 的派生

mod value_objects;

pub use value_objects::{normalize_identity, ArtworkRequest, CacheKey, CACHE_EXTENSION};
