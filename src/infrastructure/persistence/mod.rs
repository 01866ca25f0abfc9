//! Persistence Layer - 持久化实现
//!
//! - disk: 封面磁盘缓存（扁平目录，原子写入）

pub mod disk;
