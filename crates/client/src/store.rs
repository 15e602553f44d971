//! Durable client-side key/value state.
//!
//! The dashboard persists two entries across reloads: the credential entry
//! and the selected facility, both under fixed keys. The store is per
//! installation (per app-data directory); it is never shared between users.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use anyhow::Context;

/// Key holding the persisted credential entry (token + user, one JSON blob).
pub const CREDENTIALS_KEY: &str = "auth.credentials";

/// Key holding the selected facility id.
pub const SELECTED_FACILITY_KEY: &str = "facility.selected";

/// Key/value store abstraction for durable client state.
///
/// Writes must not panic; implementations log failures and carry on, since a
/// broken store degrades to a fresh-profile experience rather than an outage.
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

impl<S> StateStore for Arc<S>
where
    S: StateStore + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: String) {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(key);
        }
    }
}

/// JSON-file-backed store under the OS app-data directory.
///
/// The whole map is rewritten on every mutation; entries are small and
/// mutations are rare (login, logout, facility switch).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    ///
    /// An unreadable or corrupt file is discarded with a warning; state then
    /// starts empty rather than blocking startup.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create state directory at {:?}", parent))?;
        }

        let map = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read state file at {:?}", path))?;
            match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!("discarding corrupt state file at {:?}: {err}", path);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            inner: Mutex::new(map),
        })
    }

    /// Open the store at its default location.
    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Resolve the default state file path: `{app_data_dir}/carelink/state.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory")?;

        let mut path = base;
        path.push("carelink");
        path.push("state.json");
        Ok(path)
    }

    fn persist(&self, map: &HashMap<String, String>) {
        let payload = match serde_json::to_string_pretty(map) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!("failed to serialize client state: {err}");
                return;
            }
        };

        if let Err(err) = std::fs::write(&self.path, payload) {
            tracing::error!("failed to write client state to {:?}: {err}", self.path);
        }
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.lock().ok()?;
        map.get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(key.to_string(), value);
            self.persist(&map);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.remove(key);
            self.persist(&map);
        }
    }
}
