//! Shared like counters held in a remote key-value store

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::StoreError;

/// Path-addressed integer store (read-one / write-one)
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read the value at `path`; `None` when nothing is stored
    async fn read(&self, path: &str) -> Result<Option<u64>, StoreError>;

    /// Overwrite the value at `path`
    async fn write(&self, path: &str, value: u64) -> Result<(), StoreError>;
}

/// Client for a Firebase-style real-time database over its REST interface
pub struct RealtimeDbStore {
    database_url: String,
    auth: Option<String>,
    client: reqwest::Client,
}

impl RealtimeDbStore {
    pub fn new(database_url: impl Into<String>, auth: Option<String>) -> Self {
        Self {
            database_url: database_url.into(),
            auth,
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        let mut url = format!(
            "{}/{}.json",
            self.database_url.trim_end_matches('/'),
            path.trim_matches('/')
        );
        if let Some(auth) = &self.auth {
            url.push_str("?auth=");
            url.extend(utf8_percent_encode(auth, NON_ALPHANUMERIC));
        }
        url
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CounterStore for RealtimeDbStore {
    async fn read(&self, path: &str) -> Result<Option<u64>, StoreError> {
        let response = self.client.get(self.url_for(path)).send().await?;
        let value: Value = Self::check(response).await?.json().await?;
        parse_count(&value)
    }

    async fn write(&self, path: &str, value: u64) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.url_for(path))
            .json(&value)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

/// Interpret a stored JSON value as a count.
///
/// Older clients wrote counts as strings, so numeric strings are accepted
/// (leading digits only). Negative numbers floor at zero.
pub fn parse_count(value: &Value) -> Result<Option<u64>, StoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(n) = n.as_u64() {
                Ok(Some(n))
            } else if let Some(n) = n.as_i64() {
                Ok(Some(n.max(0) as u64))
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                Ok(Some(f.max(0.0).trunc() as u64))
            }
        }
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits
                .parse()
                .map(Some)
                .map_err(|_| StoreError::InvalidValue(value.to_string()))
        }
        other => Err(StoreError::InvalidValue(other.to_string())),
    }
}

/// In-process counter store, used for offline previews and tests
#[derive(Default)]
pub struct MemoryCounterStore {
    values: Mutex<HashMap<String, u64>>,
    writes: AtomicUsize,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes performed so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read(&self, path: &str) -> Result<Option<u64>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(path).copied())
    }

    async fn write(&self, path: &str, value: u64) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(path.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
