use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use face_censor_core::censoring::domain::region_censor::OverlapMode;
use face_censor_core::censoring::infrastructure::censor_factory::CensorMethod;
use face_censor_core::shared::constants::DEFAULT_BLOCK_SIZE;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persisted defaults; command-line flags override each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub method: CensorMethod,
    pub block_size: u32,
    pub overlap: OverlapMode,
    #[serde(default)]
    pub min_confidence: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            method: CensorMethod::Pixelation,
            block_size: DEFAULT_BLOCK_SIZE,
            overlap: OverlapMode::Compound,
            min_confidence: None,
        }
    }
}

impl Settings {
    /// `<config dir>/FaceCensor/settings.json`.
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|d| d.join("FaceCensor").join("settings.json"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Loads saved settings, falling back to defaults when none exist or
    /// they cannot be read.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                log::debug!("{e}; using default settings");
                return Self::default();
            }
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)
    }
}
