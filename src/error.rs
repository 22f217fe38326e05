use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No image file provided")]
    MissingImage,

    #[error("Only image files are supported")]
    UnsupportedFile { filename: String },

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),

    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    pub fn invalid_upload(msg: impl Into<String>) -> Self {
        Self::InvalidUpload(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the request itself was at fault and the engine was never called.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingImage
                | Self::UnsupportedFile { .. }
                | Self::InvalidUpload(_)
                | Self::PayloadTooLarge
                | Self::InvalidImage(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if matches!(self, Self::PayloadTooLarge) {
            StatusCode::PAYLOAD_TOO_LARGE
        } else if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
