use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}};

use crate::palette::Palette;

/// Default location of the optional override file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/icons.ron";

/// Pixel sizes per output category. Order is preserved in the generated file list.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SizeCatalog {
    pub pwa: Vec<u32>,
    pub favicon: Vec<u32>,
    /// apple-touch-icon
    pub apple: Vec<u32>,
}
impl Default for SizeCatalog {
    fn default() -> Self {
        Self {
            pwa: vec![72, 96, 128, 144, 152, 192, 384, 512],
            favicon: vec![16, 32, 48],
            apple: vec![180],
        }
    }
}

impl SizeCatalog {
    /// Number of catalog entries across all categories (progress denominator).
    pub fn total(&self) -> usize {
        self.pwa.len() + self.favicon.len() + self.apple.len()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GlyphConfig {
    pub character: char,
    /// Font file tried first. Relative paths resolve against the working directory.
    pub font: PathBuf,
    /// Absolute OS font paths tried after `font`, in order.
    pub system_fonts: Vec<PathBuf>,
}
impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            character: '€',
            font: PathBuf::from("assets/fonts/DejaVuSans.ttf"),
            system_fonts: default_system_fonts(),
        }
    }
}

fn default_system_fonts() -> Vec<PathBuf> {
    let paths: &[&str] = if cfg!(target_os = "windows") {
        &[r"C:\Windows\Fonts\arial.ttf", r"C:\Windows\Fonts\segoeui.ttf"]
    } else if cfg!(target_os = "macos") {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    } else {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        ]
    };
    paths.iter().map(PathBuf::from).collect()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MaskableConfig {
    /// PWA sizes that also get a `-maskable` variant.
    pub sizes: Vec<u32>,
    /// Fraction of the canvas taken by the embedded icon (safe zone).
    pub scale: f32,
}
impl Default for MaskableConfig {
    fn default() -> Self {
        Self { sizes: vec![192, 512], scale: 0.8 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FaviconConfig {
    /// Favicons above this size are drawn as background only.
    pub foreground_max: u32,
}
impl Default for FaviconConfig {
    fn default() -> Self {
        Self { foreground_max: 48 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct IconConfig {
    pub sizes: SizeCatalog,
    pub palette: Palette,
    pub glyph: GlyphConfig,
    pub maskable: MaskableConfig,
    pub favicon: FaviconConfig,
}

impl IconConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Defaults when `path` does not exist. A file that exists must load;
    /// a broken override is an error rather than a silent fallback.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<(Self, bool), String> {
        if !path.as_ref().exists() {
            return Ok((Self::default(), false));
        }
        Self::load_from_file(path).map(|cfg| (cfg, true))
    }

    /// Validate the configuration returning a list of human‑readable warning strings.
    /// Nothing here is fatal; the batch still runs with the values as given.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        fn check_sizes(w: &mut Vec<String>, label: &str, sizes: &[u32]) {
            if sizes.is_empty() {
                w.push(format!("sizes.{label} is empty; no {label} icons will be written"));
            }
            if sizes.contains(&0) {
                w.push(format!("sizes.{label} contains 0; produces an empty image"));
            }
            let mut seen = Vec::with_capacity(sizes.len());
            for s in sizes {
                if seen.contains(s) {
                    w.push(format!("sizes.{label} lists {s} twice; file is overwritten"));
                }
                seen.push(*s);
            }
        }
        check_sizes(&mut w, "pwa", &self.sizes.pwa);
        check_sizes(&mut w, "favicon", &self.sizes.favicon);
        check_sizes(&mut w, "apple", &self.sizes.apple);
        if let Some(big) = self.sizes.favicon.iter().find(|s| **s > 256) {
            w.push(format!("sizes.favicon {big} exceeds the 256px ICO limit"));
        }
        if self.sizes.apple.len() > 1 {
            w.push(format!(
                "sizes.apple has {} entries; apple-touch-icon.png keeps only the last",
                self.sizes.apple.len()
            ));
        }
        for m in &self.maskable.sizes {
            if !self.sizes.pwa.contains(m) {
                w.push(format!("maskable size {m} is not a pwa size; no variant written"));
            }
        }
        if !(self.maskable.scale > 0.0 && self.maskable.scale <= 1.0) {
            w.push(format!("maskable.scale {} outside (0, 1]", self.maskable.scale));
        } else if self.maskable.scale > 0.9 {
            w.push(format!(
                "maskable.scale {} leaves little safe zone; masks may clip the icon",
                self.maskable.scale
            ));
        }
        if self.glyph.character.is_whitespace() || self.glyph.character.is_control() {
            w.push("glyph.character has no visible outline; the fallback shape will be drawn".into());
        }
        w
    }
}
