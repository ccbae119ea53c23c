//! Batch driver: renders the size catalog and writes every icon file.
//!
//! Outputs, relative to the two target directories:
//!   icons/  icon-<s>x<s>.png, icon-<s>x<s>-maskable.png, apple-touch-icon-<s>x<s>.png
//!   public/ favicon-<s>x<s>.png, favicon.ico, apple-touch-icon.png
//!
//! Every run rewrites all files in place, so repeated runs are idempotent.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};

use crate::capabilities::{ensure_encoders, REQUIRED_FORMATS};
use crate::config::IconConfig;
use crate::render::{IconRenderer, MaskableLayout, RenderMode};

#[derive(Debug, Clone, PartialEq)]
pub struct OutputDirs {
    /// PWA icons, maskable variants, apple-touch copy.
    pub icons: PathBuf,
    /// Favicons and the root apple-touch-icon.
    pub public: PathBuf,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self { icons: PathBuf::from("assets/icons"), public: PathBuf::from("public") }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Pwa,
    Maskable,
    Favicon,
    FaviconIco,
    AppleTouch,
    /// Second copy of the apple-touch icon in the icons directory.
    AppleTouchCopy,
}

#[derive(Debug, Clone)]
pub struct WrittenFile {
    pub kind: OutputKind,
    /// Edge length; the largest embedded size for the ICO.
    pub size: u32,
    pub path: PathBuf,
}

#[derive(Debug, Default, Clone)]
pub struct BatchReport {
    pub files: Vec<WrittenFile>,
}

impl BatchReport {
    pub fn count(&self, kind: OutputKind) -> usize {
        self.files.iter().filter(|f| f.kind == kind).count()
    }

    /// Distinct icons produced (the apple-touch duplicate is not counted twice).
    pub fn asset_count(&self) -> usize {
        self.files.len() - self.count(OutputKind::AppleTouchCopy)
    }

    fn push(&mut self, kind: OutputKind, size: u32, path: PathBuf) {
        self.files.push(WrittenFile { kind, size, path });
    }
}

pub struct IconBatch {
    config: IconConfig,
    renderer: IconRenderer,
    dirs: OutputDirs,
    required: Vec<ImageFormat>,
}

impl IconBatch {
    pub fn new(config: IconConfig, dirs: OutputDirs) -> Self {
        let renderer = IconRenderer::from_config(&config);
        Self { config, renderer, dirs, required: REQUIRED_FORMATS.to_vec() }
    }

    pub fn with_renderer(mut self, renderer: IconRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Override the encoders checked before anything is written.
    pub fn require_formats(mut self, formats: &[ImageFormat]) -> Self {
        self.required = formats.to_vec();
        self
    }

    pub fn dirs(&self) -> &OutputDirs {
        &self.dirs
    }

    pub fn run(&self) -> Result<BatchReport> {
        ensure_encoders(&self.required)?;
        for dir in [&self.dirs.icons, &self.dirs.public] {
            fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
        }

        let sizes = &self.config.sizes;
        let total = sizes.total();
        let mut current = 0;
        let mut report = BatchReport::default();

        println!("\nGenerating PWA icons...");
        for &size in &sizes.pwa {
            current += 1;
            let name = format!("icon-{size}x{size}.png");
            println!("  [{current}/{total}] Creating {name}...");
            let icon = self.renderer.render(size, RenderMode::Full);
            let path = self.dirs.icons.join(name);
            save_png(&icon, &path)?;
            report.push(OutputKind::Pwa, size, path);

            if self.config.maskable.sizes.contains(&size) {
                let name = format!("icon-{size}x{size}-maskable.png");
                println!("  [{current}/{total}] Creating {name}...");
                let layout = MaskableLayout::new(size, self.config.maskable.scale);
                let path = self.dirs.icons.join(name);
                save_png(&self.renderer.render_maskable(layout), &path)?;
                report.push(OutputKind::Maskable, size, path);
            }
        }

        println!("\nGenerating favicons...");
        let mut favicons = Vec::with_capacity(sizes.favicon.len());
        for &size in &sizes.favicon {
            current += 1;
            let name = format!("favicon-{size}x{size}.png");
            println!("  [{current}/{total}] Creating {name}...");
            let icon = self.renderer.render(size, RenderMode::Favicon);
            let path = self.dirs.public.join(name);
            save_png(&icon, &path)?;
            report.push(OutputKind::Favicon, size, path);
            favicons.push(icon);
        }
        if favicons.is_empty() {
            log::warn!("no favicon sizes configured; skipping favicon.ico");
        } else {
            println!("  Creating favicon.ico (multi-resolution)...");
            let path = self.dirs.public.join("favicon.ico");
            write_ico(&favicons, &path)?;
            let largest = favicons.iter().map(RgbImage::width).max().unwrap_or(0);
            report.push(OutputKind::FaviconIco, largest, path);
        }

        println!("\nGenerating Apple Touch icon...");
        for &size in &sizes.apple {
            current += 1;
            println!("  [{current}/{total}] Creating apple-touch-icon.png ({size}x{size})...");
            let icon = self.renderer.render(size, RenderMode::Full);
            let path = self.dirs.public.join("apple-touch-icon.png");
            save_png(&icon, &path)?;
            report.push(OutputKind::AppleTouch, size, path);
            let path = self.dirs.icons.join(format!("apple-touch-icon-{size}x{size}.png"));
            save_png(&icon, &path)?;
            report.push(OutputKind::AppleTouchCopy, size, path);
        }

        log::info!("wrote {} files ({} icons)", report.files.len(), report.asset_count());
        Ok(report)
    }
}

/// Buffered file whose final flush is checked, so a full disk fails the write.
fn write_file(path: &Path, encode: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    encode(&mut out).with_context(|| format!("write {}", path.display()))?;
    out.flush().with_context(|| format!("flush {}", path.display()))
}

fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    write_file(path, |out| {
        PngEncoder::new(out).write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)?;
        Ok(())
    })
}

/// One ICO file holding every image as a PNG-compressed entry, in the given order.
pub fn write_ico(images: &[RgbImage], path: &Path) -> Result<()> {
    let frames = images
        .iter()
        .map(|img| IcoFrame::as_png(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("encode ICO frames for {}", path.display()))?;
    write_file(path, |out| {
        IcoEncoder::new(out).encode_images(&frames)?;
        Ok(())
    })
}
