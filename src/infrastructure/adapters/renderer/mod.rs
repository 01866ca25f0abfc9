//! Renderer Adapter - 帧缓冲渲染实现

mod framebuffer_renderer;

pub use framebuffer_renderer::{render_frame, FramebufferConfig, FramebufferRenderer};
