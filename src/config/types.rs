use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Settings handed to the OCR engine on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language pack(s), e.g. `eng` or `eng+deu`.
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub dpi: Option<i32>,
    /// Page segmentation mode (`--psm`).
    #[serde(default)]
    pub psm: Option<i32>,
    /// OCR engine mode (`--oem`).
    #[serde(default)]
    pub oem: Option<i32>,
    #[serde(default)]
    pub config_variables: HashMap<String, String>,
    /// Accepted upload filename extensions. Empty disables the filename check.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            dpi: None,
            psm: None,
            oem: None,
            config_variables: HashMap::new(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_lang() -> String {
    "eng".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()]
}
