/// User settings kept in chrome.storage.sync

use crate::config::API_KEY_KEY;
use crate::error::{ClipperError, Result};
use crate::storage::KeyValueStore;
use serde_json::Value;

pub struct SettingsStore<K> {
    backend: K,
}

impl<K: KeyValueStore> SettingsStore<K> {
    pub fn new(backend: K) -> Self {
        SettingsStore { backend }
    }

    /// The stored key exactly as saved, or None when unset
    pub async fn api_key(&self) -> Result<Option<String>> {
        Ok(match self.backend.get(API_KEY_KEY).await? {
            Some(Value::String(key)) => Some(key),
            _ => None,
        })
    }

    /// Like `api_key`, but an unset or blank key is an error
    pub async fn require_api_key(&self) -> Result<String> {
        match self.api_key().await? {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ClipperError::MissingApiKey),
        }
    }

    pub async fn has_api_key(&self) -> Result<bool> {
        Ok(self.api_key().await?.is_some_and(|k| !k.is_empty()))
    }

    /// Saved verbatim; no format checks
    pub async fn save_api_key(&self, key: &str) -> Result<()> {
        self.backend
            .set(API_KEY_KEY, Value::String(key.to_string()))
            .await
    }
}
