//! Application configuration at `~/.daybook/config.json`.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the managed record store project.
    pub store_url: String,
    /// Publishable API key sent with every request.
    pub api_key: String,
    /// IANA timezone name for all local-day semantics.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".daybook")
            .join("config.json")
    }

    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "config not found at {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve the configured timezone.
    pub fn tz(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse()
            .map_err(|_| AppError::Config(format!("unknown timezone: {}", self.timezone)))
    }
}
