//! Preference storage for per-user dashboard overrides.
//!
//! A preference is a single numeric value addressed by `(email, setting_key)`.
//! Backends implement [`PreferenceStore`]; callers hold them as
//! `Arc<dyn PreferenceStore>` so the edit workflow never depends on a concrete
//! client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::{decode_lookup_body, RestStore};

pub const DEFAULT_ENDPOINT: &str = "https://xyzcompany.supabase.co";
pub const DEFAULT_ACCESS_KEY: &str = "public-anon-key";
pub const DEFAULT_TABLE: &str = "user_settings";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Remote,
    Memory,
}

impl StoreKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" | "rest" => Some(StoreKind::Remote),
            "memory" | "local" => Some(StoreKind::Memory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Remote => "remote",
            StoreKind::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub endpoint: String,
    pub access_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Remote,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: DEFAULT_ACCESS_KEY.to_string(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl StoreConfig {
    /// True when either credential still carries its placeholder default.
    pub fn uses_placeholders(&self) -> bool {
        self.endpoint == DEFAULT_ENDPOINT || self.access_key == DEFAULT_ACCESS_KEY
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("store returned status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("could not decode store response: {0}")]
    Decode(String),
    #[error("invalid store configuration: {0}")]
    Config(String),
}

/// One stored override. Unique on `(email, setting_key)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub email: String,
    pub setting_key: String,
    pub custom_value: f64,
    pub updated_at: DateTime<Utc>,
}

impl PreferenceRecord {
    pub fn new(
        email: impl Into<String>,
        setting_key: impl Into<String>,
        custom_value: f64,
    ) -> Self {
        Self {
            email: email.into(),
            setting_key: setting_key.into(),
            custom_value,
            updated_at: Utc::now(),
        }
    }
}

/// The part of a record returned by a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredValue {
    pub custom_value: f64,
}

pub trait PreferenceStore: Send + Sync {
    /// Reads the value stored for `(email, setting_key)`, if any.
    fn lookup(&self, email: &str, setting_key: &str) -> Result<Option<StoredValue>, RemoteError>;

    /// Inserts the record or overwrites the one already stored for its key.
    fn upsert(&self, record: &PreferenceRecord) -> Result<(), RemoteError>;

    fn kind(&self) -> StoreKind;
}

pub struct StoreFactory;

impl StoreFactory {
    pub fn create(config: &StoreConfig) -> Result<Arc<dyn PreferenceStore>, RemoteError> {
        match config.kind {
            StoreKind::Remote => {
                if config.uses_placeholders() {
                    log::warn!(
                        "preference store is using placeholder credentials ({}); \
                         remote calls will fail",
                        config.endpoint
                    );
                }
                Ok(Arc::new(RestStore::new(config)?))
            }
            StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}
