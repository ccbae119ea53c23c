//! Icon generator for the web app's PWA manifest, favicons and apple-touch icon.
//!
//! Usage (from the project root, no arguments needed):
//!   cargo run --release
//!
//! Optional overrides:
//!   cargo run --release -- --icons-dir assets/icons --public-dir public \
//!       --config assets/config/icons.ron --font /path/to/font.ttf

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use icon_forge::capabilities::{ensure_encoders, REQUIRED_FORMATS};
use icon_forge::config::DEFAULT_CONFIG_PATH;
use icon_forge::{BatchReport, IconBatch, IconConfig, OutputDirs, OutputKind};

#[derive(Parser, Debug)]
#[command(about = "Generate PWA icons, favicons and the apple-touch icon", version)]
struct Args {
    /// Directory for PWA, maskable and apple-touch copies.
    #[arg(long, default_value = "assets/icons")]
    icons_dir: PathBuf,
    /// Directory for favicons and apple-touch-icon.png.
    #[arg(long, default_value = "public")]
    public_dir: PathBuf,
    /// RON overrides for sizes, palette and glyph. Defaults to assets/config/icons.ron when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Font file tried before the OS fonts.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!("Icon generator: PWA icons + favicons");
    println!();

    if let Err(missing) = ensure_encoders(REQUIRED_FORMATS) {
        eprintln!("Error: {missing}");
        eprintln!();
        eprintln!("{}", missing.guidance());
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(outcome) => {
            print_summary(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nError during generation: {e:#}");
            // Debug formatting carries the cause chain and the backtrace when RUST_BACKTRACE is set.
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<(BatchReport, OutputDirs)> {
    let mut config = match &args.config {
        Some(path) => IconConfig::load_from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("load config {}", path.display()))?,
        None => {
            let (cfg, loaded) = IconConfig::load_or_default(DEFAULT_CONFIG_PATH)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("load config {DEFAULT_CONFIG_PATH}"))?;
            if loaded {
                info!("using {DEFAULT_CONFIG_PATH}");
            }
            cfg
        }
    };
    if let Some(font) = args.font {
        config.glyph.font = font;
    }
    for w in config.validate() {
        warn!("config: {w}");
    }

    let dirs = OutputDirs { icons: args.icons_dir, public: args.public_dir };
    let batch = IconBatch::new(config, dirs);
    let report = batch.run()?;
    Ok((report, batch.dirs().clone()))
}

fn print_summary((report, dirs): &(BatchReport, OutputDirs)) {
    println!("\n{}", "=".repeat(60));
    println!("Generation complete!");
    println!("\nSummary:");
    println!(
        "  - {} PWA icons + {} maskable",
        report.count(OutputKind::Pwa),
        report.count(OutputKind::Maskable)
    );
    println!(
        "  - {} favicon PNGs + {} multi-resolution ICO",
        report.count(OutputKind::Favicon),
        report.count(OutputKind::FaviconIco)
    );
    println!(
        "  - {} Apple Touch icon (+ {} copy)",
        report.count(OutputKind::AppleTouch),
        report.count(OutputKind::AppleTouchCopy)
    );
    println!("  - Total: {} icons, {} files", report.asset_count(), report.files.len());
    println!("\nFiles written to:");
    println!("  - {}", dirs.icons.display());
    println!("  - {}", dirs.public.display());
}
