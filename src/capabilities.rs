//! Up-front check that the image codecs the batch writes were compiled in.
//! Runs before any directory is created so a misconfigured build leaves the
//! filesystem untouched.

use image::ImageFormat;

/// Formats every run writes: PNG icons and the ICO favicon container.
pub const REQUIRED_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Ico];

#[derive(Debug, thiserror::Error)]
#[error("{format:?} encoding is not available in this build")]
pub struct MissingCapability {
    pub format: ImageFormat,
    /// `image` crate feature that provides the encoder.
    pub feature: &'static str,
}

impl MissingCapability {
    pub fn guidance(&self) -> String {
        format!(
            "Enable the `{feature}` feature of the image crate in Cargo.toml:\n  \
             image = {{ version = \"0.25\", default-features = false, features = [\"png\", \"ico\"] }}\n\
             Or add it with:\n  \
             cargo add image --features {feature}",
            feature = self.feature
        )
    }
}

pub fn ensure_encoders(formats: &[ImageFormat]) -> Result<(), MissingCapability> {
    match formats.iter().find(|f| !f.writing_enabled()) {
        Some(&format) => Err(MissingCapability {
            format,
            feature: format.extensions_str().first().copied().unwrap_or("?"),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_formats_are_compiled_in() {
        ensure_encoders(REQUIRED_FORMATS).expect("png + ico encoders");
    }

    #[test]
    fn missing_encoder_names_its_feature() {
        let err = ensure_encoders(&[ImageFormat::Png, ImageFormat::Avif]).unwrap_err();
        assert_eq!(err.format, ImageFormat::Avif);
        assert_eq!(err.feature, "avif");
        assert!(err.guidance().contains("cargo add image --features avif"));
        assert!(err.to_string().contains("Avif"));
    }
}
