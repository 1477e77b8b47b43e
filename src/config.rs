// Application configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::crossfade::DEFAULT_FADE;

const APP_DIR: &str = "aigc-chronicles";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Length of the ambient background cross-fade.
    pub crossfade_ms: u64,
    /// Length of the card slide between carousel positions.
    pub card_transition_ms: u64,
    pub preload_media: bool,
    pub start_index: usize,
    pub window_width: f32,
    pub window_height: f32,
    pub log_filter: String,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crossfade_ms: DEFAULT_FADE.as_millis() as u64,
            card_transition_ms: 700,
            preload_media: true,
            start_index: 0,
            window_width: 1280.0,
            window_height: 800.0,
            log_filter: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Directory for rolling log files, when file logging is enabled.
    pub fn log_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(APP_DIR).join("logs"))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the user config, falling back to defaults on any problem.
    ///
    /// Runs before logging is initialised, so the problem is returned for the
    /// caller to report.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        let Some(path) = Self::default_path() else {
            return (Self::default(), None);
        };
        match Self::load_from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn crossfade(&self) -> Duration {
        Duration::from_millis(self.crossfade_ms)
    }

    pub fn card_transition(&self) -> Duration {
        Duration::from_millis(self.card_transition_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_file(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.crossfade(), Duration::from_millis(1000));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "crossfade_ms": 250, "preload_media": false }}"#).unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.crossfade_ms, 250);
        assert!(!config.preload_media);
        assert_eq!(config.card_transition_ms, 700);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn malformed_file_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ crossfade_ms: ").unwrap();

        match AppConfig::load_from_file(file.path()) {
            Err(ConfigError::Json { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn directory_in_place_of_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppConfig::load_from_file(dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }
}
