//! Settings persistence - load and save settings to disk.
//!
//! Settings are stored in the platform-specific application config folder:
//! - macOS: ~/Library/Application Support/com.device-risk.Device-Risk/
//! - Windows: %APPDATA%/device-risk/Device Risk/config/
//! - Linux: ~/.config/devicerisk/

use super::Settings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "device-risk";
const APP_NAME: &str = "Device Risk";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not determine settings path")]
    NoConfigDir,
    #[error("Failed to write settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from the platform config dir, falling back to defaults.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_from(&path)
}

fn load_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Save settings to disk, creating the parent directory if needed.
pub fn save_settings(settings: &Settings) -> Result<PathBuf, SettingsError> {
    let path = settings_path().ok_or(SettingsError::NoConfigDir)?;
    save_to(settings, &path)?;
    Ok(path)
}

fn save_to(settings: &Settings, path: &Path) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).map_err(io_err)?;

    tracing::info!("Saved settings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILENAME);

        let mut settings = Settings::default();
        settings.general.dark_mode = true;
        settings.service.request_timeout_secs = Some(15);
        save_to(&settings, &path).unwrap();

        assert_eq!(load_from(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_from(&dir.path().join("none.toml")), Settings::default());
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "general = [not toml").unwrap();
        assert_eq!(load_from(&path), Settings::default());
    }
}
