//! Glyph compositing: font lookup chain + centered single-character drawing.
//!
//! Fonts are tried in order (configured file, OS font paths, built-in font) and
//! the first one that parses *and* has an outline for the requested character
//! wins. Nothing is cached; every draw reloads its font from disk.

use std::{fmt, fs, path::PathBuf};

use ab_glyph::{point, Font, FontVec, OutlinedGlyph};
use anyhow::{anyhow, bail, Context, Result};
use image::Rgba;
use imageproc::drawing::Canvas;

use super::shapes::IconCanvas;
use crate::config::GlyphConfig;
use crate::palette::HexColor;

#[cfg(feature = "embedded_font")]
const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// One place a font may come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    File(PathBuf),
    /// Compiled into the binary (`embedded_font` feature).
    Builtin,
}

impl FontSource {
    pub fn load(&self) -> Result<FontVec> {
        match self {
            FontSource::File(path) => {
                let data = fs::read(path).with_context(|| format!("read font {}", path.display()))?;
                FontVec::try_from_vec(data).map_err(|e| anyhow!("decode font {}: {e}", path.display()))
            }
            FontSource::Builtin => load_builtin(),
        }
    }
}

#[cfg(feature = "embedded_font")]
fn load_builtin() -> Result<FontVec> {
    FontVec::try_from_vec(EMBEDDED_FONT.to_vec()).map_err(|e| anyhow!("decode built-in font: {e}"))
}

#[cfg(not(feature = "embedded_font"))]
fn load_builtin() -> Result<FontVec> {
    bail!("no built-in font in this build (enable the `embedded_font` feature)")
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(p) => write!(f, "{}", p.display()),
            FontSource::Builtin => f.write_str("<built-in>"),
        }
    }
}

/// Ordered font lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FontChain {
    sources: Vec<FontSource>,
}

impl FontChain {
    pub fn new(sources: Vec<FontSource>) -> Self {
        Self { sources }
    }

    /// Named font, then the OS paths, then the built-in font.
    pub fn from_config(glyph: &GlyphConfig) -> Self {
        let mut sources = Vec::with_capacity(glyph.system_fonts.len() + 2);
        sources.push(FontSource::File(glyph.font.clone()));
        sources.extend(glyph.system_fonts.iter().cloned().map(FontSource::File));
        sources.push(FontSource::Builtin);
        Self { sources }
    }

    pub fn sources(&self) -> &[FontSource] {
        &self.sources
    }

    /// First font in the chain that can draw `ch`.
    pub fn resolve(&self, ch: char) -> Result<(FontVec, &FontSource)> {
        for source in &self.sources {
            match source.load() {
                Ok(font) if font.glyph_id(ch).0 != 0 => return Ok((font, source)),
                Ok(_) => log::debug!("font {source} has no glyph for {ch:?}"),
                Err(e) => log::debug!("font {source} unavailable: {e:#}"),
            }
        }
        bail!("none of {} font sources can draw {ch:?}", self.sources.len())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub offset: (i32, i32),
    pub color: Rgba<u8>,
}

impl Default for Shadow {
    fn default() -> Self {
        Self { offset: (2, 2), color: HexColor::BLACK.with_alpha(100) }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GlyphStyle {
    pub color: HexColor,
    pub shadow: Option<Shadow>,
}

/// Draw `ch` with its ink bounding box centered on `center`.
/// `em_px` is the font size in pixels per em.
pub fn draw_centered(
    canvas: &mut IconCanvas,
    font: &FontVec,
    ch: char,
    em_px: f32,
    center: (f32, f32),
    style: &GlyphStyle,
) -> Result<()> {
    let scale = font
        .pt_to_px_scale(em_px)
        .ok_or_else(|| anyhow!("font reports no units per em"))?;
    let id = font.glyph_id(ch);
    if id.0 == 0 {
        bail!("font has no glyph for {ch:?}");
    }
    let outlined = font
        .outline_glyph(id.with_scale_and_position(scale, point(0.0, 0.0)))
        .ok_or_else(|| anyhow!("glyph {ch:?} has no outline at {em_px}px"))?;
    let bounds = outlined.px_bounds();
    let left = (center.0 - bounds.width() / 2.0).round() as i32;
    let top = (center.1 - bounds.height() / 2.0).round() as i32;

    if let Some(shadow) = style.shadow {
        blit(canvas, &outlined, left + shadow.offset.0, top + shadow.offset.1, shadow.color);
    }
    blit(canvas, &outlined, left, top, style.color.with_alpha(255));
    Ok(())
}

/// Composite the glyph coverage mask onto the canvas with its top-left at (`left`, `top`).
fn blit(canvas: &mut IconCanvas, glyph: &OutlinedGlyph, left: i32, top: i32, color: Rgba<u8>) {
    let (w, h) = canvas.dimensions();
    glyph.draw(|gx, gy, coverage| {
        let x = left + gx as i32;
        let y = top + gy as i32;
        if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
            return;
        }
        let alpha = (color[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        if alpha > 0 {
            canvas.draw_pixel(x as u32, y as u32, Rgba([color[0], color[1], color[2], alpha]));
        }
    });
}
