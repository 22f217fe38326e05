use image::DynamicImage;
use ocr_rust::{Error, Result, recognition::Recognizer};
use std::sync::Mutex;

/// Stub recognizer that records every image it is handed.
#[derive(Debug)]
pub struct StubRecognizer {
    pub text: String,
    pub error: Option<String>,
    pub version_error: Option<String>,
    pub calls: Mutex<Vec<(u32, u32)>>,
}

impl StubRecognizer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            error: None,
            version_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_version_error(mut self, error: impl Into<String>) -> Self {
        self.version_error = Some(error.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for StubRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for StubRecognizer {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn extract_text(&self, image: &DynamicImage) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((image.width(), image.height()));

        match &self.error {
            Some(error) => Err(Error::engine(error.clone())),
            None => Ok(self.text.clone()),
        }
    }

    fn version(&self) -> Result<String> {
        match &self.version_error {
            Some(error) => Err(Error::engine(error.clone())),
            None => Ok("0.0.0-stub".to_string()),
        }
    }
}

/// Answers with the image dimensions, so output depends only on the input.
#[derive(Debug, Default)]
pub struct DimensionsRecognizer;

impl Recognizer for DimensionsRecognizer {
    fn name(&self) -> &'static str {
        "dimensions"
    }

    fn extract_text(&self, image: &DynamicImage) -> Result<String> {
        Ok(format!("{}x{}", image.width(), image.height()))
    }

    fn version(&self) -> Result<String> {
        Ok("1".to_string())
    }
}
