//! Key-value storage behind the theme preference and the session identity
//!
//! On the web this is `localStorage` (durable) and `sessionStorage` (per tab).
//! Native builds keep durable values as files under the platform data dir and
//! session values in memory for the life of the process.

use std::collections::HashMap;
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, io, path::PathBuf};

/// Durable key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Session key holding the per-tab user id.
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================
// In-memory store
// ============================================

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// ============================================
// File store (native platforms)
// ============================================

/// One file per key inside `dir`, named `<key>.txt`.
///
/// Only [`THEME_KEY`] and [`USER_ID_KEY`] are ever stored, so keys are used
/// as file names unchanged.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the platform's local data directory.
    pub fn default_location() -> Self {
        if let Some(data_dir) = dirs::data_local_dir() {
            return Self::new(data_dir.join("chat-widget").join("storage"));
        }

        Self::new(PathBuf::from("cache").join("storage"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.txt"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            // Hand-edited files usually end in a newline.
            Ok(value) => Some(value.trim().to_string()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read `{key}`: {err}");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |e: io::Error| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(self.path_for(key), value).map_err(write_err)
    }
}

// ============================================
// Browser store (wasm)
// ============================================

#[cfg(target_arch = "wasm32")]
pub struct BrowserStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage missing".to_string()))?;
        Ok(Self { storage })
    }

    pub fn session() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .session_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage missing".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

// ============================================
// Platform defaults
// ============================================

#[cfg(not(target_arch = "wasm32"))]
pub fn durable_store() -> Box<dyn KeyValueStore> {
    Box::new(FileStore::default_location())
}

#[cfg(target_arch = "wasm32")]
pub fn durable_store() -> Box<dyn KeyValueStore> {
    match BrowserStore::local() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!("falling back to memory for durable storage: {err}");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn session_store() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::new())
}

#[cfg(target_arch = "wasm32")]
pub fn session_store() -> Box<dyn KeyValueStore> {
    match BrowserStore::session() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!("falling back to memory for session storage: {err}");
            Box::new(MemoryStore::new())
        }
    }
}
