//! Icon rasterization.
//!
//! Two compositions share one gradient + disc + glyph pipeline:
//! * [`RenderMode::Full`]: PWA / apple icons. Violet gradient, translucent white
//!   disc inside a 15% margin, shadowed glyph at 60% of the disc.
//! * [`RenderMode::Favicon`]: primary-to-violet gradient; at small sizes a solid
//!   white disc and an unshadowed glyph, larger sizes stay background only.
//!
//! Rendering never fails. When no font can draw the glyph a geometric stand-in
//! (ring + bar for full icons, ring only for favicons) is drawn instead.

pub mod glyph;
pub mod gradient;
pub mod shapes;

use image::{imageops, DynamicImage, RgbImage};

use crate::config::IconConfig;
use crate::palette::{HexColor, Palette};
use glyph::{FontChain, GlyphStyle, Shadow};
use gradient::vertical_gradient;
use shapes::{fill_disc, fill_rect, stroke_ring, IconCanvas};

/// Margin on each side of a full icon, as a fraction of its size.
const ICON_PADDING: f32 = 0.15;
/// Glyph em size relative to the space it is centered in.
const GLYPH_SCALE: f32 = 0.6;
const DISC_ALPHA: u8 = 230;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Full,
    Favicon,
}

/// Where the shrunken icon sits inside a maskable canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskableLayout {
    pub size: u32,
    /// Edge length of the embedded icon.
    pub inner: u32,
    /// Offset on both axes.
    pub offset: u32,
}

impl MaskableLayout {
    pub fn new(size: u32, scale: f32) -> Self {
        let inner = ((size as f32 * scale) as u32).min(size);
        Self { size, inner, offset: (size - inner) / 2 }
    }
}

#[derive(Debug, Clone)]
pub struct IconRenderer {
    palette: Palette,
    glyph: char,
    fonts: FontChain,
    favicon_foreground_max: u32,
}

impl IconRenderer {
    pub fn from_config(cfg: &IconConfig) -> Self {
        Self {
            palette: cfg.palette,
            glyph: cfg.glyph.character,
            fonts: FontChain::from_config(&cfg.glyph),
            favicon_foreground_max: cfg.favicon.foreground_max,
        }
    }

    /// Replace the font lookup chain.
    pub fn with_fonts(mut self, fonts: FontChain) -> Self {
        self.fonts = fonts;
        self
    }

    /// Render one `size`×`size` icon.
    pub fn render(&self, size: u32, mode: RenderMode) -> RgbImage {
        let canvas = match mode {
            RenderMode::Full => self.full_icon(size),
            RenderMode::Favicon => self.favicon(size),
        };
        DynamicImage::ImageRgba8(canvas.0).into_rgb8()
    }

    /// Full icon shrunk by `layout` and centered on a solid `gradient_start` canvas.
    pub fn render_maskable(&self, layout: MaskableLayout) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(layout.size, layout.size, self.palette.gradient_start.to_rgb());
        let icon = self.render(layout.inner, RenderMode::Full);
        imageops::replace(&mut canvas, &icon, layout.offset as i64, layout.offset as i64);
        canvas
    }

    fn full_icon(&self, size: u32) -> IconCanvas {
        let p = &self.palette;
        let mut canvas = IconCanvas(vertical_gradient(size, p.gradient_start, p.gradient_end));

        let padding = size as f32 * ICON_PADDING;
        let inner = size as f32 - 2.0 * padding;
        let c = (size / 2) as i32;
        let disc_radius = (inner / 2.0).floor() as i32;
        fill_disc(&mut canvas, (c, c), disc_radius, HexColor::WHITE.with_alpha(DISC_ALPHA));

        let glyph_px = inner * GLYPH_SCALE;
        let style = GlyphStyle { color: p.primary, shadow: Some(Shadow::default()) };
        if let Err(e) = self.try_glyph(&mut canvas, glyph_px.trunc(), c, &style) {
            log::warn!("{size}px icon: glyph unavailable, drawing basic symbol ({e:#})");
            let r = (glyph_px / 2.0).floor() as i32;
            let primary = p.primary.with_alpha(255);
            stroke_ring(&mut canvas, (c, c), r, (size as f32 * 0.08) as i32, primary);
            let bar_half = (r as f32 * 1.2) as i32;
            let bar_height = (size as f32 * 0.06) as i32;
            fill_rect(
                &mut canvas,
                c - bar_half,
                c - bar_height / 2,
                c + bar_half / 3,
                c + bar_height / 2,
                primary,
            );
        }
        canvas
    }

    fn favicon(&self, size: u32) -> IconCanvas {
        let p = &self.palette;
        let mut canvas = IconCanvas(vertical_gradient(size, p.primary, p.gradient_end));
        if size > self.favicon_foreground_max {
            return canvas;
        }
        let c = (size / 2) as i32;
        let radius = (size / 3) as i32;
        fill_disc(&mut canvas, (c, c), radius, HexColor::WHITE.with_alpha(255));

        let style = GlyphStyle { color: p.primary, shadow: None };
        let glyph_px = (size as f32 * GLYPH_SCALE).trunc();
        if let Err(e) = self.try_glyph(&mut canvas, glyph_px, c, &style) {
            log::warn!("{size}px favicon: glyph unavailable, drawing ring ({e:#})");
            let width = (size as i32 / 16).max(1);
            stroke_ring(&mut canvas, (c, c), radius / 2, width, p.primary.with_alpha(255));
        }
        canvas
    }

    fn try_glyph(&self, canvas: &mut IconCanvas, em_px: f32, center: i32, style: &GlyphStyle) -> anyhow::Result<()> {
        let (font, source) = self.fonts.resolve(self.glyph)?;
        log::debug!("drawing {:?} at {em_px}px with {source}", self.glyph);
        glyph::draw_centered(canvas, &font, self.glyph, em_px, (center as f32, center as f32), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{GRADIENT_START, PRIMARY};
    use glyph::FontSource;
    use image::Rgb;
    use std::path::Path;

    fn no_fonts() -> IconRenderer {
        IconRenderer::from_config(&IconConfig::default())
            .with_fonts(FontChain::new(vec![FontSource::File("/missing/font.ttf".into())]))
    }

    fn bundled_fonts() -> Option<IconRenderer> {
        let p = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSans.ttf");
        p.exists().then(|| IconRenderer::from_config(&IconConfig::default()).with_fonts(FontChain::new(vec![FontSource::File(p)])))
    }

    fn near(a: Rgb<u8>, b: HexColor) -> bool {
        a.0.iter().zip(b.0).all(|(x, y)| (*x as i32 - y as i32).abs() <= 1)
    }

    #[test]
    fn every_catalog_size_has_exact_dimensions() {
        let r = no_fonts();
        let cfg = IconConfig::default();
        for &s in cfg.sizes.pwa.iter().chain(&cfg.sizes.apple) {
            assert_eq!(r.render(s, RenderMode::Full).dimensions(), (s, s));
        }
        for &s in &cfg.sizes.favicon {
            assert_eq!(r.render(s, RenderMode::Favicon).dimensions(), (s, s));
        }
    }

    #[test]
    fn fallback_draws_bar_through_center() {
        let img = no_fonts().render(192, RenderMode::Full);
        // bar spans x = 96-48 ..= 96+16 on the middle row
        assert!(near(*img.get_pixel(96, 96), PRIMARY));
        assert!(near(*img.get_pixel(50, 96), PRIMARY));
        assert!(near(*img.get_pixel(112, 96), PRIMARY));
        // ring at radius 40, 15px wide; inside hole above the bar is disc white-ish
        assert!(near(*img.get_pixel(96, 96 - 35), PRIMARY));
        let hole = img.get_pixel(96, 96 - 15);
        assert!(hole.0.iter().all(|c| *c > 200), "expected translucent white disc, got {hole:?}");
        // corner keeps the gradient start color
        assert_eq!(img.get_pixel(0, 0).0, GRADIENT_START.0);
    }

    #[test]
    fn fallback_survives_tiny_sizes() {
        let r = no_fonts();
        for s in [0, 1, 2, 3, 5] {
            assert_eq!(r.render(s, RenderMode::Full).dimensions(), (s, s));
            assert_eq!(r.render(s, RenderMode::Favicon).dimensions(), (s, s));
        }
    }

    #[test]
    fn favicon_fallback_is_ring_on_white_disc() {
        let img = no_fonts().render(32, RenderMode::Favicon);
        // disc radius 10, ring radius 5 width 2
        assert_eq!(img.get_pixel(16, 16).0, [255, 255, 255]);
        assert!(near(*img.get_pixel(21, 16), PRIMARY));
        assert_eq!(img.get_pixel(24, 16).0, [255, 255, 255]);
    }

    #[test]
    fn large_favicon_is_background_only() {
        let p = Palette::default();
        let img = no_fonts().render(64, RenderMode::Favicon);
        let bg = DynamicImage::ImageRgba8(vertical_gradient(64, p.primary, p.gradient_end)).into_rgb8();
        assert_eq!(img, bg);
    }

    #[test]
    fn glyph_differs_from_fallback() {
        let Some(r) = bundled_fonts() else { return };
        let with_font = r.render(192, RenderMode::Full);
        let fallback = no_fonts().render(192, RenderMode::Full);
        assert_eq!(with_font.dimensions(), (192, 192));
        assert_ne!(with_font, fallback);
        let ink = with_font.pixels().filter(|p| near(**p, PRIMARY)).count();
        assert!(ink > 100, "expected primary-colored glyph ink, found {ink} pixels");
    }

    #[test]
    fn maskable_layout_truncates_and_centers() {
        assert_eq!(MaskableLayout::new(192, 0.8), MaskableLayout { size: 192, inner: 153, offset: 19 });
        assert_eq!(MaskableLayout::new(512, 0.8), MaskableLayout { size: 512, inner: 409, offset: 51 });
        assert_eq!(MaskableLayout::new(10, 2.0).inner, 10);
    }

    #[test]
    fn maskable_embeds_icon_at_offset() {
        let r = no_fonts();
        let layout = MaskableLayout::new(192, 0.8);
        let img = r.render_maskable(layout);
        let icon = r.render(layout.inner, RenderMode::Full);
        assert_eq!(img.dimensions(), (192, 192));
        let (o, n) = (layout.offset, layout.inner);
        for (x, y) in [(0, 0), (n / 2, n / 2), (n - 1, n - 1), (0, n - 1)] {
            assert_eq!(img.get_pixel(o + x, o + y), icon.get_pixel(x, y), "icon pixel ({x},{y})");
        }
        // padding is the solid start color
        let pad = GRADIENT_START.to_rgb();
        assert_eq!(*img.get_pixel(o - 1, 96), pad);
        assert_eq!(*img.get_pixel(96, o + n), pad);
        assert_eq!(*img.get_pixel(191, 191), pad);
        // bottom row of the icon is darker than the padding
        assert_ne!(*img.get_pixel(o, o + n - 1), pad);
    }
}
