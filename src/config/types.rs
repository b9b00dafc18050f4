use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub exhibition: ExhibitionDefaults,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host + port of the backend; `/api/v1` is appended per call.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_seconds))
    }
}

/// Fields sent with every new exhibition that the constructor has no
/// editing UI for yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitionDefaults {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_cover_type")]
    pub cover_type: String,
    #[serde(default = "default_date_template")]
    pub date_template: String,
    #[serde(default)]
    pub start_year: i32,
    #[serde(default)]
    pub end_year: i32,
    #[serde(default)]
    pub rating: i32,
}

/// Object key prefixes passed to `/files/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_exhibition_prefix")]
    pub exhibition_prefix: String,
    #[serde(default = "default_exhibit_prefix")]
    pub exhibit_prefix: String,
    #[serde(default = "default_profile_prefix")]
    pub profile_prefix: String,
}

/// Where the bearer token and selected organization are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Overrides the default session file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_status() -> String {
    "draft".to_string()
}

fn default_cover_type() -> String {
    "outside".to_string()
}

fn default_date_template() -> String {
    "year".to_string()
}

fn default_exhibition_prefix() -> String {
    "exhibitions".to_string()
}

fn default_exhibit_prefix() -> String {
    "exhibits".to_string()
}

fn default_profile_prefix() -> String {
    "profiles".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ExhibitionDefaults {
    fn default() -> Self {
        Self {
            status: default_status(),
            cover_type: default_cover_type(),
            date_template: default_date_template(),
            start_year: 0,
            end_year: 0,
            rating: 0,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            exhibition_prefix: default_exhibition_prefix(),
            exhibit_prefix: default_exhibit_prefix(),
            profile_prefix: default_profile_prefix(),
        }
    }
}
