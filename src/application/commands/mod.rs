//! 应用层 - 命令（写操作）
//!
//! 写显示设备：开机画面、"正在播放" 封面

mod display_commands;

pub mod handlers;

pub use display_commands::*;
