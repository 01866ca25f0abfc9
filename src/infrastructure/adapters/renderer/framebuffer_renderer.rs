//! Framebuffer Renderer - 图像 → RGB565 帧缓冲
//!
//! 实现 DisplayPort trait
//!
//! 流水线：解码 → 旋转（扩展边界）→ 等比缩小 → 黑底画布左上角贴图 → RGB565 LE → 一次写入设备

use async_trait::async_trait;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbImage};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ports::{DisplayPort, RenderError};
use crate::domain::display::{encode_rgb565_le, Rotation};

/// 帧缓冲配置，构造后不可变
#[derive(Debug, Clone)]
pub struct FramebufferConfig {
    pub rotation: Rotation,
    pub screen_width: u32,
    pub screen_height: u32,
    /// 输出设备或文件（原始像素流）
    pub framebuffer: PathBuf,
}

/// 帧缓冲渲染器
///
/// CPU 密集部分在 blocking 线程池中执行
pub struct FramebufferRenderer {
    config: Arc<FramebufferConfig>,
    /// 防止并发写入交错，设备内容总是某一次完整的帧
    sink_lock: Arc<Mutex<()>>,
}

impl FramebufferRenderer {
    pub fn new(config: FramebufferConfig) -> Self {
        tracing::info!(
            width = config.screen_width,
            height = config.screen_height,
            rotation = config.rotation.degrees(),
            framebuffer = %config.framebuffer.display(),
            "FramebufferRenderer initialized"
        );

        Self {
            config: Arc::new(config),
            sink_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// 解码图像，格式按内容判断（缓存文件扩展名固定为 .jpg）
fn load_image(path: &Path) -> Result<DynamicImage, RenderError> {
    ImageReader::open(path)
        .map_err(|e| RenderError::Decode(format!("Cannot open {}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| RenderError::Decode(format!("Cannot read {}: {}", path.display(), e)))?
        .decode()
        .map_err(|e| RenderError::Decode(format!("Cannot decode {}: {}", path.display(), e)))
}

/// 逆时针旋转，直角旋转不会裁剪内容
fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::Deg0 => image,
        Rotation::Deg90 => image.rotate270(),
        Rotation::Deg180 => image.rotate180(),
        Rotation::Deg270 => image.rotate90(),
    }
}

/// 等比缩小到边界内，从不放大
fn fit_within(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if image.width() <= max_width && image.height() <= max_height {
        return image;
    }
    image.resize(max_width, max_height, FilterType::Lanczos3)
}

/// 黑色画布，图像贴在 (0, 0)，剩余区域保持黑色
fn compose(image: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, &image.to_rgb8(), 0, 0);
    canvas
}

/// 完整渲染流水线，返回行优先的 RGB565 LE 字节
pub fn render_frame(image: DynamicImage, config: &FramebufferConfig) -> Vec<u8> {
    let rotated = rotate(image, config.rotation);
    let fitted = fit_within(rotated, config.screen_width, config.screen_height);
    let canvas = compose(&fitted, config.screen_width, config.screen_height);

    let pixel_count = (config.screen_width as usize) * (config.screen_height as usize);
    encode_rgb565_le(canvas.pixels().map(|p| p.0), pixel_count)
}

/// 一次性写入整帧，覆盖原有内容
fn write_frame(path: &Path, frame: &[u8]) -> Result<(), RenderError> {
    let mut sink = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| RenderError::Io(format!("Cannot open {}: {}", path.display(), e)))?;

    sink.write_all(frame)
        .and_then(|_| sink.flush())
        .map_err(|e| RenderError::Io(format!("Cannot write {}: {}", path.display(), e)))
}

#[async_trait]
impl DisplayPort for FramebufferRenderer {
    async fn display(&self, image_path: &Path) -> Result<(), RenderError> {
        let config = self.config.clone();
        let sink_lock = self.sink_lock.clone();
        let image_path = image_path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let image = load_image(&image_path)?;
            let (source_width, source_height) = (image.width(), image.height());
            let frame = render_frame(image, &config);

            {
                let _guard = sink_lock
                    .lock()
                    .map_err(|e| RenderError::Io(format!("Framebuffer lock poisoned: {}", e)))?;
                write_frame(&config.framebuffer, &frame)?;
            }

            tracing::debug!(
                path = %image_path.display(),
                source_width,
                source_height,
                bytes = frame.len(),
                "Frame written"
            );
            Ok(())
        })
        .await
        .map_err(|e| RenderError::Io(format!("Render task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    const RED: [u8; 2] = [0x00, 0xF8];
    const BLUE: [u8; 2] = [0x1F, 0x00];
    const BLACK: [u8; 2] = [0x00, 0x00];

    fn config(dir: &TempDir, rotation: Rotation, width: u32, height: u32) -> FramebufferConfig {
        FramebufferConfig {
            rotation,
            screen_width: width,
            screen_height: height,
            framebuffer: dir.path().join("fb0"),
        }
    }

    fn save_png(dir: &TempDir, name: &str, image: RgbImage) -> PathBuf {
        let path = dir.path().join(name);
        DynamicImage::ImageRgb8(image)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 2] {
        let offset = ((y * width + x) as usize) * 2;
        [frame[offset], frame[offset + 1]]
    }

    /// 非黑区域的宽高
    fn content_extent(frame: &[u8], width: u32, height: u32) -> (u32, u32) {
        let (mut max_x, mut max_y) = (0, 0);
        for y in 0..height {
            for x in 0..width {
                if pixel(frame, width, x, y) != BLACK {
                    max_x = max_x.max(x + 1);
                    max_y = max_y.max(y + 1);
                }
            }
        }
        (max_x, max_y)
    }

    #[tokio::test]
    async fn test_solid_image_fills_canvas() {
        let dir = tempdir().unwrap();
        let source = save_png(&dir, "red.png", RgbImage::from_pixel(4, 2, Rgb([255, 0, 0])));
        let renderer = FramebufferRenderer::new(config(&dir, Rotation::Deg0, 4, 2));

        renderer.display(&source).await.unwrap();

        let frame = std::fs::read(dir.path().join("fb0")).unwrap();
        assert_eq!(frame.len(), 4 * 2 * 2);
        assert!(frame.chunks(2).all(|p| p == RED));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let dir = tempdir().unwrap();
        // 宽图，竖屏画布
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 100, Rgb([255, 255, 255])));
        let frame = render_frame(image, &config(&dir, Rotation::Deg0, 60, 80));

        assert_eq!(frame.len(), 60 * 80 * 2);
        let (w, h) = content_extent(&frame, 60, 80);
        assert_eq!(w, 60);
        assert!((h as i64 - 30).abs() <= 1, "height {}", h);
        // 下方为黑边
        assert_eq!(pixel(&frame, 60, 0, 79), BLACK);
        assert_eq!(pixel(&frame, 60, 59, 40), BLACK);
    }

    #[test]
    fn test_small_image_is_not_enlarged() {
        let dir = tempdir().unwrap();
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([0, 0, 255])));
        let frame = render_frame(image, &config(&dir, Rotation::Deg0, 4, 3));

        assert_eq!(content_extent(&frame, 4, 3), (2, 2));
        assert_eq!(pixel(&frame, 4, 0, 0), BLUE);
        assert_eq!(pixel(&frame, 4, 1, 1), BLUE);
        assert_eq!(pixel(&frame, 4, 2, 0), BLACK);
        assert_eq!(pixel(&frame, 4, 0, 2), BLACK);
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let dir = tempdir().unwrap();
        // 左红右蓝
        let mut source = RgbImage::new(2, 1);
        source.put_pixel(0, 0, Rgb([255, 0, 0]));
        source.put_pixel(1, 0, Rgb([0, 0, 255]));

        let ccw = render_frame(
            DynamicImage::ImageRgb8(source.clone()),
            &config(&dir, Rotation::Deg90, 1, 2),
        );
        assert_eq!(ccw, [BLUE, RED].concat());

        let cw = render_frame(
            DynamicImage::ImageRgb8(source),
            &config(&dir, Rotation::Deg270, 1, 2),
        );
        assert_eq!(cw, [RED, BLUE].concat());
    }

    #[test]
    fn test_rotation_expands_bounds_before_fitting() {
        let dir = tempdir().unwrap();
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 100, Rgb([255, 255, 255])));
        let frame = render_frame(image, &config(&dir, Rotation::Deg90, 80, 80));

        let (w, h) = content_extent(&frame, 80, 80);
        assert_eq!(h, 80);
        assert!((w as i64 - 40).abs() <= 1, "width {}", w);
    }

    #[tokio::test]
    async fn test_decodes_by_content_not_extension() {
        let dir = tempdir().unwrap();
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([255, 0, 0])))
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        let source = dir.path().join("cached.jpg");
        std::fs::write(&source, png).unwrap();

        let renderer = FramebufferRenderer::new(config(&dir, Rotation::Deg0, 1, 1));
        renderer.display(&source).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("fb0")).unwrap(), RED);
    }

    #[tokio::test]
    async fn test_overwrites_previous_frame() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("fb0"), [0xAAu8; 100]).unwrap();
        let source = save_png(&dir, "red.png", RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])));
        let renderer = FramebufferRenderer::new(config(&dir, Rotation::Deg0, 2, 2));

        renderer.display(&source).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("fb0")).unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_invalid_image_is_decode_error() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        std::fs::write(&source, b"definitely not an image").unwrap();
        let renderer = FramebufferRenderer::new(config(&dir, Rotation::Deg0, 2, 2));

        let result = renderer.display(&source).await;

        assert!(matches!(result, Err(RenderError::Decode(_))));
        assert!(!dir.path().join("fb0").exists());
    }

    #[tokio::test]
    async fn test_missing_image_is_decode_error() {
        let dir = tempdir().unwrap();
        let renderer = FramebufferRenderer::new(config(&dir, Rotation::Deg0, 2, 2));

        let result = renderer.display(&dir.path().join("missing.png")).await;

        assert!(matches!(result, Err(RenderError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unwritable_sink_is_io_error() {
        let dir = tempdir().unwrap();
        let source = save_png(&dir, "red.png", RgbImage::from_pixel(2, 2, Rgb([255, 0, 0])));
        let mut cfg = config(&dir, Rotation::Deg0, 2, 2);
        cfg.framebuffer = dir.path().join("no-such-dir").join("fb0");
        let renderer = FramebufferRenderer::new(cfg);

        let result = renderer.display(&source).await;

        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
