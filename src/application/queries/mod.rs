//! 应用层 - 查询（读操作）
//!
//! 封面解析：缓存 → 数据源回退链 → 回退图片

mod artwork_queries;

pub mod handlers;

pub use artwork_queries::*;
