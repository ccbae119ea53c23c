//! Basic shape primitives. None of these can fail: out-of-canvas pixels are
//! clipped and degenerate shapes draw nothing.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, Canvas};
use imageproc::rect::Rect;

/// Working surface: every draw is composited "over" the existing pixels.
/// An opaque pixel stays exactly opaque whatever is drawn onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct IconCanvas(pub RgbaImage);

impl Canvas for IconCanvas {
    type Pixel = Rgba<u8>;

    fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    fn get_pixel(&self, x: u32, y: u32) -> Self::Pixel {
        *self.0.get_pixel(x, y)
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Self::Pixel) {
        let dst = self.0.get_pixel_mut(x, y);
        *dst = over(*dst, color);
    }
}

/// Porter-Duff source-over in integer arithmetic, rounded to nearest.
fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    match sa {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    // dst alpha scaled by the uncovered fraction, in 0..=255
    let da = (dst[3] as u32 * (255 - sa) + 127) / 255;
    let out_a = sa + da;
    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = src[i] as u32 * sa + dst[i] as u32 * da;
        out[i] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = out_a as u8;
    Rgba(out)
}

/// Filled circle. Each pixel is blended exactly once so translucent fills stay even.
pub fn fill_disc(canvas: &mut IconCanvas, center: (i32, i32), radius: i32, color: Rgba<u8>) {
    if radius < 0 {
        return;
    }
    let r2 = radius * radius;
    for_each_in_box(canvas, center, radius, |canvas, x, y, dx, dy| {
        if dx * dx + dy * dy <= r2 {
            canvas.draw_pixel(x, y, color);
        }
    });
}

/// Circle outline `width` pixels thick, growing inward from `radius`.
pub fn stroke_ring(canvas: &mut IconCanvas, center: (i32, i32), radius: i32, width: i32, color: Rgba<u8>) {
    if radius <= 0 || width <= 0 {
        return;
    }
    let outer = radius as f32;
    let inner = (radius - width) as f32;
    for_each_in_box(canvas, center, radius, |canvas, x, y, dx, dy| {
        let d = ((dx * dx + dy * dy) as f32).sqrt();
        if d <= outer && d > inner {
            canvas.draw_pixel(x, y, color);
        }
    });
}

/// Visit the canvas pixels of the square bounding a circle, clipped to the canvas.
/// The callback receives the pixel and its offset from `center`.
fn for_each_in_box<F>(canvas: &mut IconCanvas, center: (i32, i32), radius: i32, mut f: F)
where
    F: FnMut(&mut IconCanvas, u32, u32, i32, i32),
{
    let (w, h) = canvas.dimensions();
    let x0 = (center.0 - radius).max(0);
    let y0 = (center.1 - radius).max(0);
    let x1 = (center.0 + radius).min(w as i32 - 1);
    let y1 = (center.1 + radius).min(h as i32 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            f(canvas, x as u32, y as u32, x - center.0, y - center.1);
        }
    }
}

/// Filled rectangle between two inclusive corners.
pub fn fill_rect(canvas: &mut IconCanvas, left: i32, top: i32, right: i32, bottom: i32, color: Rgba<u8>) {
    let (w, h) = canvas.dimensions();
    if right < left || bottom < top || w == 0 || h == 0 {
        return;
    }
    let rect = Rect::at(left, top).of_size((right - left + 1) as u32, (bottom - top + 1) as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(size: u32) -> IconCanvas {
        IconCanvas(RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 255])))
    }

    #[test]
    fn translucent_disc_blends_with_background() {
        let mut c = canvas(32);
        fill_disc(&mut c, (16, 16), 8, Rgba([255, 255, 255, 128]));
        // 255 * 128 / 255 over black
        assert_eq!(c.0.get_pixel(16, 16).0, [128, 128, 128, 255]);
        // outside the disc untouched
        assert_eq!(c.0.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn opaque_canvas_stays_opaque_under_any_alpha() {
        let mut c = canvas(1);
        for a in 1..=255u8 {
            c.draw_pixel(0, 0, Rgba([255, 255, 255, a]));
            assert_eq!(c.0.get_pixel(0, 0)[3], 255, "alpha {a}");
        }
        // repeated translucent white converges on white
        assert_eq!(c.0.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn over_matches_reference_values() {
        let bg = Rgba([100, 200, 0, 255]);
        assert_eq!(over(bg, Rgba([255, 255, 255, 230])), Rgba([240, 250, 230, 255]));
        assert_eq!(over(bg, Rgba([0, 0, 0, 100])), Rgba([61, 122, 0, 255]));
        assert_eq!(over(bg, Rgba([9, 9, 9, 0])), bg);
        assert_eq!(over(Rgba([0, 0, 0, 0]), Rgba([10, 20, 30, 128])), Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn disc_radius_is_inclusive() {
        let mut c = canvas(32);
        let white = Rgba([255, 255, 255, 255]);
        fill_disc(&mut c, (16, 16), 5, white);
        assert_eq!(*c.0.get_pixel(21, 16), white);
        assert_eq!(*c.0.get_pixel(16, 11), white);
        assert_ne!(*c.0.get_pixel(22, 16), white);
        assert_ne!(*c.0.get_pixel(20, 20), white, "corner of the bounding box is outside");
    }

    #[test]
    fn ring_leaves_hole() {
        let mut c = canvas(40);
        let red = Rgba([255, 0, 0, 255]);
        stroke_ring(&mut c, (20, 20), 10, 3, red);
        assert_eq!(*c.0.get_pixel(20, 20), Rgba([0, 0, 0, 255]), "center must stay empty");
        assert_eq!(*c.0.get_pixel(30, 20), red, "outer edge drawn");
        assert_eq!(*c.0.get_pixel(28, 20), red, "inner edge drawn");
        assert_eq!(*c.0.get_pixel(27, 20), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn ring_clips_at_canvas_edges() {
        let mut c = canvas(10);
        stroke_ring(&mut c, (0, 0), 30, 5, Rgba([255, 0, 0, 255]));
        assert_eq!(c.0.dimensions(), (10, 10));
    }

    #[test]
    fn rect_is_inclusive_and_degenerate_is_noop() {
        let mut c = canvas(16);
        let blue = Rgba([0, 0, 255, 255]);
        fill_rect(&mut c, 2, 4, 5, 4, blue);
        assert_eq!(*c.0.get_pixel(2, 4), blue);
        assert_eq!(*c.0.get_pixel(5, 4), blue);
        assert_ne!(*c.0.get_pixel(6, 4), blue);
        assert_ne!(*c.0.get_pixel(2, 5), blue);
        fill_rect(&mut c, 8, 8, 7, 9, blue);
        assert_ne!(*c.0.get_pixel(8, 8), blue);
    }
}
