use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use ocr_rust::{
    config::Config,
    recognition::Recognizer,
    server::{AppState, router},
};
use serde_json::Value;
use std::{io::Cursor, sync::Arc};

pub const BOUNDARY: &str = "ocr-test-boundary-7MA4YWxkTrZu0gW";

/// Create a router around `recognizer` using default configuration
pub fn create_test_app(recognizer: Arc<dyn Recognizer>) -> Router {
    create_test_app_with_config(recognizer, &Config::default())
}

pub fn create_test_app_with_config(recognizer: Arc<dyn Recognizer>, config: &Config) -> Router {
    let state = AppState::new(recognizer, config.ocr.allowed_extensions.clone());
    router(state, config.server.max_upload_bytes)
}

/// Encode a solid white image in the given format
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb([255, 255, 255])));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .expect("Failed to encode test image");
    buffer.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded_image(width, height, ImageFormat::Jpeg)
}

/// Builds a multipart/form-data body by hand
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

/// POST a multipart body to /recognize
pub fn recognize_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recognize")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Single `image` field request
pub fn image_upload(filename: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    recognize_request(
        MultipartBuilder::new()
            .file("image", filename, content_type, bytes)
            .build(),
    )
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
