use prefstore::{
    StoreConfig, StoreKind, DEFAULT_ACCESS_KEY, DEFAULT_ENDPOINT, DEFAULT_TABLE,
    DEFAULT_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::DEFAULT_SLOT_INDEX;

pub const DEFAULT_SETTINGS_FILE: &str = "callboard.toml";
pub const ENV_STORE_URL: &str = "CALLBOARD_STORE_URL";
pub const ENV_STORE_KEY: &str = "CALLBOARD_STORE_KEY";
pub const ENV_STORE_KIND: &str = "CALLBOARD_STORE_KIND";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {message}")]
    Read { path: PathBuf, message: String },
    #[error("failed to parse settings file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to write settings file '{path}': {message}")]
    Write { path: PathBuf, message: String },
    #[error("slot_index {index} is outside the series (len {len})")]
    InvalidSlotIndex { index: usize, len: usize },
    #[error("store kind must be 'remote' or 'memory', got '{0}'")]
    InvalidStoreKind(String),
    #[error("store timeout_secs must be at least 1")]
    InvalidTimeout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub kind: StoreKind,
    pub endpoint: String,
    pub access_key: String,
    pub table: String,
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::Remote,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: DEFAULT_ACCESS_KEY.to_string(),
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub slot_index: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            slot_index: DEFAULT_SLOT_INDEX,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub dashboard: DashboardSettings,
}

impl Settings {
    /// Resolves settings from `explicit`, else `callboard.toml` in the working
    /// directory when present, else defaults; then applies environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match explicit {
            Some(path) => Self::load_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                if default_path.exists() {
                    Self::load_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(settings)
    }

    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| SettingsError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, text).map_err(|e| SettingsError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Overrides store fields from variables returned by `lookup`. Blank
    /// values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(url) = read(ENV_STORE_URL) {
            self.store.endpoint = url.trim().to_string();
        }
        if let Some(key) = read(ENV_STORE_KEY) {
            self.store.access_key = key.trim().to_string();
        }
        if let Some(kind) = read(ENV_STORE_KIND) {
            self.store.kind =
                StoreKind::parse(&kind).ok_or(SettingsError::InvalidStoreKind(kind))?;
        }
        Ok(())
    }

    pub fn validate(&self, series_len: usize) -> Result<(), SettingsError> {
        if self.dashboard.slot_index >= series_len {
            return Err(SettingsError::InvalidSlotIndex {
                index: self.dashboard.slot_index,
                len: series_len,
            });
        }
        if self.store.timeout_secs == 0 {
            return Err(SettingsError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            kind: self.store.kind,
            endpoint: self.store.endpoint.clone(),
            access_key: self.store.access_key.clone(),
            table: self.store.table.clone(),
            timeout: Duration::from_secs(self.store.timeout_secs.max(1)),
        }
    }
}
