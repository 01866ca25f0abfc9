//! Display Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("不支持的旋转角度: {0}（必须是 90 的倍数）")]
    UnsupportedRotation(i32),
}
