mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration named by `CONFIG_PATH`, falling back to
/// `config.yaml`. Built-in defaults apply when neither is present.
pub async fn load() -> Result<Config> {
    let (config_path, explicit) = match env::var("CONFIG_PATH") {
        Ok(path) => (path, true),
        Err(_) => (DEFAULT_CONFIG_PATH.to_string(), false),
    };

    if !explicit && !Path::new(&config_path).exists() {
        debug!("No {} found, using default configuration", config_path);
        return Ok(Config::default());
    }

    load_from(&config_path).await
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| Error::config(format!("cannot read {}: {}", config_path, e)))?;

    from_str(&config_str)
}

pub fn from_str(config_str: &str) -> Result<Config> {
    // An empty document is valid and means "all defaults".
    let config: Config = if config_str.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(config_str)?
    };

    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("server.port must be non-zero"));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(Error::config("server.max_upload_bytes must be non-zero"));
        }
        if self.ocr.lang.trim().is_empty() {
            return Err(Error::config("ocr.lang must not be empty"));
        }
        if let Some(psm) = self.ocr.psm {
            if !(0..=13).contains(&psm) {
                return Err(Error::config(format!(
                    "ocr.psm must be between 0 and 13, got {}",
                    psm
                )));
            }
        }
        if let Some(oem) = self.ocr.oem {
            if !(0..=3).contains(&oem) {
                return Err(Error::config(format!(
                    "ocr.oem must be between 0 and 3, got {}",
                    oem
                )));
            }
        }
        Ok(())
    }
}
