pub mod engine;
pub mod request;

pub use engine::{Recognizer, TesseractRecognizer};
pub use request::{RecognitionRequest, check_extension};
