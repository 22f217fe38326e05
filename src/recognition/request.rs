use crate::{Error, Result};
use image::DynamicImage;

/// An uploaded image held in memory for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

impl RecognitionRequest {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            filename: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Rejects filenames whose extension is not in `allowed`.
    pub fn check_extension(&self, allowed: &[String]) -> Result<()> {
        match &self.filename {
            Some(filename) => check_extension(filename, allowed),
            None => Ok(()),
        }
    }

    /// Decodes the buffer by sniffing its magic bytes; the declared content
    /// type is informational only. An empty buffer fails like any other
    /// unrecognised format.
    pub fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.bytes)?)
    }
}

pub fn check_extension(filename: &str, allowed: &[String]) -> Result<()> {
    if allowed.is_empty() {
        return Ok(());
    }

    // Plain suffix match, so a bare ".png" is accepted too.
    let lowered = filename.to_ascii_lowercase();
    let accepted = allowed
        .iter()
        .any(|ext| lowered.ends_with(&format!(".{}", ext.to_ascii_lowercase())));

    if accepted {
        Ok(())
    } else {
        Err(Error::UnsupportedFile {
            filename: filename.to_string(),
        })
    }
}
