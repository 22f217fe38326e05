pub mod config;
pub mod error;
pub mod recognition;
pub mod server;

pub use error::{Error, Result};
