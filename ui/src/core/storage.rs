//! Local persistence for user settings.
//!
//! Only small string preferences live here. On the web they go to
//! `localStorage`; on desktop into a JSON map under the OS config directory.

use std::cell::RefCell;
use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String key/value persistence.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Volatile store used by tests and as a fallback when the platform store
/// cannot be opened.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The platform's persistent store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    #[cfg(not(target_arch = "wasm32"))]
    path: PathBuf,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Result<Self, StorageError> {
        local_storage()?;
        Ok(Self {})
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalStore {
    const FILE_NAME: &'static str = "settings.json";

    /// Open the settings file in the per-user config directory.
    pub fn open() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("dev", "Ascend", "ascend-dashboard")
            .ok_or_else(|| StorageError::Unavailable("no home directory".into()))?;
        Ok(Self::at(dirs.config_dir().join(Self::FILE_NAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::default();
        assert_eq!(store.load("ascend-theme").unwrap(), None);
        store.save("ascend-theme", "light").unwrap();
        assert_eq!(store.load("ascend-theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn settings_file_created_on_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = LocalStore::at(&path);

        assert_eq!(store.load("ascend-theme").unwrap(), None);
        store.save("ascend-theme", "system").unwrap();
        store.save("other", "x").unwrap();

        let reopened = LocalStore::at(&path);
        assert_eq!(reopened.load("ascend-theme").unwrap().as_deref(), Some("system"));
        assert_eq!(reopened.load("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn corrupt_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        let store = LocalStore::at(&path);
        assert!(matches!(store.load("ascend-theme"), Err(StorageError::Encoding(_))));
    }
}
