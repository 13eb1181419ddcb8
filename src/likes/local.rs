//! Per-profile flag storage (the local counterpart of browser localStorage)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::StoreError;

/// Key of the persisted user identifier
pub const USER_ID_KEY: &str = "userId";

/// String key-value storage local to one profile
pub trait FlagStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Storage key of the liked flag for a slug
pub fn liked_key(slug: &str) -> String {
    format!("liked-{}", slug)
}

/// Return the profile's user id, generating and storing one on first use
pub fn user_id(store: &dyn FlagStore) -> Result<String, StoreError> {
    if let Some(id) = store.get_item(USER_ID_KEY)? {
        if !id.is_empty() {
            return Ok(id);
        }
    }
    let id = generate_user_id();
    store.set_item(USER_ID_KEY, &id)?;
    Ok(id)
}

/// `user_` + 9 random base-36 characters + Unix time in milliseconds.
/// Uniqueness is best effort.
fn generate_user_id() -> String {
    let mut random = uuid::Uuid::new_v4().as_u128();
    let mut fragment = String::with_capacity(9);
    for _ in 0..9 {
        let digit = (random % 36) as u32;
        random /= 36;
        fragment.push(std::char::from_digit(digit, 36).unwrap_or('0'));
    }
    format!(
        "user_{}{}",
        fragment,
        chrono::Utc::now().timestamp_millis()
    )
}

/// JSON-file backed storage.
///
/// The whole map is cached in memory and rewritten on every `set_item`.
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`; a missing file starts empty
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlagStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&*items)?)?;
        Ok(())
    }
}

/// In-process storage
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.lock().map_err(|_| StoreError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
