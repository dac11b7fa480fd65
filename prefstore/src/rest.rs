use crate::{PreferenceRecord, PreferenceStore, RemoteError, StoreConfig, StoreKind, StoredValue};

/// PostgREST-style client for a hosted `user_settings` table.
pub struct RestStore {
    agent: ureq::Agent,
    base_url: String,
    access_key: String,
    table: String,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, RemoteError> {
        let endpoint = config.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(RemoteError::Config(format!(
                "endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }
        if config.table.trim().is_empty() {
            return Err(RemoteError::Config("table name is empty".to_string()));
        }
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Ok(Self {
            agent,
            base_url: endpoint.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            table: config.table.trim().to_string(),
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.access_key)
            .set("Authorization", &format!("Bearer {}", self.access_key))
    }
}

impl From<ureq::Error> for RemoteError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => RemoteError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => RemoteError::Transport(transport.to_string()),
        }
    }
}

/// Decodes the JSON array returned by a filtered select. An empty array means
/// no record is stored for the key.
pub fn decode_lookup_body(body: &str) -> Result<Option<StoredValue>, RemoteError> {
    let rows: Vec<StoredValue> =
        serde_json::from_str(body).map_err(|err| RemoteError::Decode(err.to_string()))?;
    Ok(rows.into_iter().next())
}

impl PreferenceStore for RestStore {
    fn lookup(&self, email: &str, setting_key: &str) -> Result<Option<StoredValue>, RemoteError> {
        let request = self
            .agent
            .get(&self.table_url())
            .query("select", "custom_value")
            .query("email", &format!("eq.{email}"))
            .query("setting_key", &format!("eq.{setting_key}"))
            .query("limit", "1")
            .set("Accept", "application/json");
        let response = self.authorize(request).call()?;
        let body = response
            .into_string()
            .map_err(|err| RemoteError::Decode(err.to_string()))?;
        decode_lookup_body(&body)
    }

    fn upsert(&self, record: &PreferenceRecord) -> Result<(), RemoteError> {
        let request = self
            .agent
            .post(&self.table_url())
            .query("on_conflict", "email,setting_key")
            .set("Prefer", "resolution=merge-duplicates,return=minimal");
        self.authorize(request).send_json(record)?;
        log::debug!(
            "upserted preference {} for {}",
            record.setting_key,
            record.email
        );
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }
}
