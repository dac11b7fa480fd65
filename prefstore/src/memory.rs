use crate::{PreferenceRecord, PreferenceStore, RemoteError, StoreKind, StoredValue};
use std::collections::HashMap;
use std::sync::Mutex;

type RecordKey = (String, String);

/// Process-local store. Last write wins, nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordKey, PreferenceRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = PreferenceRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| ((record.email.clone(), record.setting_key.clone()), record))
            .collect();
        Self {
            records: Mutex::new(map),
        }
    }

    pub fn get(&self, email: &str, setting_key: &str) -> Option<PreferenceRecord> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(&key(email, setting_key)).cloned())
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key(email: &str, setting_key: &str) -> RecordKey {
    (email.to_string(), setting_key.to_string())
}

impl PreferenceStore for MemoryStore {
    fn lookup(&self, email: &str, setting_key: &str) -> Result<Option<StoredValue>, RemoteError> {
        let records = self
            .records
            .lock()
            .map_err(|_| RemoteError::Transport("memory store lock poisoned".to_string()))?;
        Ok(records
            .get(&key(email, setting_key))
            .map(|record| StoredValue {
                custom_value: record.custom_value,
            }))
    }

    fn upsert(&self, record: &PreferenceRecord) -> Result<(), RemoteError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| RemoteError::Transport("memory store lock poisoned".to_string()))?;
        records.insert(key(&record.email, &record.setting_key), record.clone());
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }
}
