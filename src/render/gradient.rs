use image::RgbaImage;

use crate::palette::HexColor;

/// Top-to-bottom two-color gradient. Every row is a single color interpolated
/// with ratio `y / size`, so row 0 is exactly `from` and the last row stops one
/// step short of `to`.
pub fn vertical_gradient(size: u32, from: HexColor, to: HexColor) -> RgbaImage {
    let rows: Vec<image::Rgba<u8>> = (0..size)
        .map(|y| from.lerp(to, y as f32 / size as f32).with_alpha(255))
        .collect();
    RgbaImage::from_fn(size, size, |_, y| rows[y as usize])
}
