use crate::{Error, Result, config::OcrConfig};
use image::DynamicImage;
use rusty_tesseract::{Args, Image};
use tracing::debug;

/// Narrow seam between the HTTP layer and whatever OCR engine is installed.
///
/// Calls are synchronous and may be CPU-bound; callers on an async runtime
/// should move them onto a blocking thread.
pub trait Recognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the engine's text for `image` without any post-processing.
    fn extract_text(&self, image: &DynamicImage) -> Result<String>;

    /// Reports the engine version, failing when the engine is unavailable.
    fn version(&self) -> Result<String>;
}

pub struct TesseractRecognizer {
    config: OcrConfig,
}

impl TesseractRecognizer {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn args(&self) -> Args {
        let defaults = Args::default();
        Args {
            lang: self.config.lang.clone(),
            config_variables: self.config.config_variables.clone(),
            dpi: self.config.dpi.or(defaults.dpi),
            psm: self.config.psm.or(defaults.psm),
            oem: self.config.oem.or(defaults.oem),
            ..defaults
        }
    }
}

impl Recognizer for TesseractRecognizer {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn extract_text(&self, image: &DynamicImage) -> Result<String> {
        debug!(
            "Running tesseract on {}x{} image (lang={})",
            image.width(),
            image.height(),
            self.config.lang
        );

        let image = Image::from_dynamic_image(image).map_err(|e| Error::engine(e.to_string()))?;
        rusty_tesseract::image_to_string(&image, &self.args())
            .map_err(|e| Error::engine(e.to_string()))
    }

    fn version(&self) -> Result<String> {
        rusty_tesseract::get_tesseract_version()
            .map(|v| v.trim().to_string())
            .map_err(|e| Error::engine(e.to_string()))
    }
}
