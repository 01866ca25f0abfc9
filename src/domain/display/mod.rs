//! Display Context - 显示限界上下文
//!
//! 职责:
//! - 屏幕旋转角度
//! - RGB888 → RGB565 像素压缩

mod errors;
mod value_objects;

pub use errors::DisplayError;
pub use value_objects::{encode_rgb565_le, to_rgb565, Rotation, BYTES_PER_PIXEL};
