//! Configuration file handling.
//!
//! The TOML file is optional; every section and key has a default.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, ExhibitionDefaults, SessionConfig, UploadConfig};
