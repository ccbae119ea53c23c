//! Procedural PWA / favicon / apple-touch icon generator.

pub mod batch;
pub mod capabilities;
pub mod config;
pub mod palette;
pub mod render;

// Curated re-exports
pub use batch::{BatchReport, IconBatch, OutputDirs, OutputKind};
pub use config::IconConfig;
pub use render::{IconRenderer, MaskableLayout, RenderMode};
