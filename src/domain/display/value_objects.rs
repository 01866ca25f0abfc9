//! Display Context - Value Objects

use super::DisplayError;

/// RGB565 每像素字节数
pub const BYTES_PER_PIXEL: usize = 2;

/// 屏幕旋转角度
///
/// 正角度为逆时针方向（Rotate90 = 内容向左转 90°）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// 从角度构造，接受任意 90 的倍数（含负数）
    pub fn from_degrees(degrees: i32) -> Result<Self, DisplayError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(DisplayError::UnsupportedRotation(degrees)),
        }
    }

    pub fn degrees(&self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// 单通道量化：round(c * max / 255)，整数实现
#[inline]
fn quantize(channel: u8, max: u32) -> u16 {
    ((channel as u32 * max + 127) / 255) as u16
}

/// RGB888 → RGB565 (5 位红、6 位绿、5 位蓝)
#[inline]
pub fn to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = quantize(r, 31);
    let g6 = quantize(g, 63);
    let b5 = quantize(b, 31);
    (r5 << 11) | (g6 << 5) | b5
}

/// 将 RGB888 像素序列编码为小端 RGB565 字节流
pub fn encode_rgb565_le<I>(pixels: I, pixel_count: usize) -> Vec<u8>
where
    I: IntoIterator<Item = [u8; 3]>,
{
    let mut out = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);
    for [r, g, b] in pixels {
        out.extend_from_slice(&to_rgb565(r, g, b).to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_extremes() {
        assert_eq!(to_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(to_rgb565(0, 0, 0), 0x0000);
        assert_eq!(to_rgb565(255, 0, 0), 0xF800);
        assert_eq!(to_rgb565(0, 255, 0), 0x07E0);
        assert_eq!(to_rgb565(0, 0, 255), 0x001F);
    }

    #[test]
    fn test_rgb565_midpoint() {
        // r5 = 4095 / 255 = 16, g6 = 8191 / 255 = 32
        assert_eq!(to_rgb565(128, 128, 128), 0x8410);
    }

    #[test]
    fn test_rgb565_rounds_instead_of_truncating() {
        // 7 * 31 / 255 = 0.85 → 1, 3 * 63 / 255 = 0.74 → 1
        // 单纯移位 (7 >> 3, 3 >> 2) 会得到 0
        assert_eq!(to_rgb565(7, 3, 7), 0x0821);
        // 4 * 31 / 255 = 0.49 → 0
        assert_eq!(to_rgb565(4, 0, 4), 0x0000);
    }

    #[test]
    fn test_rgb565_matches_formula_for_every_channel_value() {
        for c in 0..=255u8 {
            let expected_5 = ((c as f64) * 31.0 / 255.0).round() as u16;
            let expected_6 = ((c as f64) * 63.0 / 255.0).round() as u16;
            assert_eq!(to_rgb565(c, 0, 0) >> 11, expected_5, "red {}", c);
            assert_eq!((to_rgb565(0, c, 0) >> 5) & 0x3F, expected_6, "green {}", c);
            assert_eq!(to_rgb565(0, 0, c) & 0x1F, expected_5, "blue {}", c);
        }
    }

    #[test]
    fn test_encode_is_little_endian() {
        let bytes = encode_rgb565_le([[255, 0, 0], [0, 0, 255]], 2);
        assert_eq!(bytes, vec![0x00, 0xF8, 0x1F, 0x00]);
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Ok(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(90), Ok(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90), Ok(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(450), Ok(Rotation::Deg90));
        assert_eq!(
            Rotation::from_degrees(45),
            Err(DisplayError::UnsupportedRotation(45))
        );
    }
}
