//! Settings types for the desktop client.
//!
//! Everything here has a working default, so a missing or broken settings
//! file never blocks start-up.

mod persistence;

pub use persistence::{load_settings, save_settings, settings_path, SettingsError};

use crate::prediction::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub service: ServiceSettings,
    pub data: DataSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable dark mode theme.
    pub dark_mode: bool,
}

/// Prediction service connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Absolute URL of the predict endpoint.
    pub endpoint: String,
    /// Per-request deadline; unset means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ServiceSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Reference dataset location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub reference_csv: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            reference_csv: PathBuf::from("assets/master_v2.csv"),
        }
    }
}
