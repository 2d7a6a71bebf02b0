// ============================================================================
// STORAGE - Almacenamiento clave/valor persistente (localStorage o memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("persistent storage is not available")]
    Unavailable,
    #[error("error reading key '{key}'")]
    Read { key: String },
    #[error("error writing key '{key}'")]
    Write { key: String },
    #[error("error removing key '{key}'")]
    Remove { key: String },
}

/// Almacenamiento clave/valor síncrono que sobrevive a recargas de página
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage en memoria. Los clones comparten el mismo mapa, así dos stores
/// creados sobre clones de un `MemoryStorage` ven sus escrituras (simula recarga).
#[derive(Clone, Default, Debug)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{KeyValueStore, StorageError};
    use web_sys::{window, Storage};

    /// `window.localStorage` del navegador
    #[derive(Clone, Copy, Default, Debug)]
    pub struct LocalStorage;

    fn get_local_storage() -> Result<Storage, StorageError> {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            get_local_storage()?
                .get_item(key)
                .map_err(|_| StorageError::Read { key: key.to_string() })
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            // QuotaExceededError llega aquí como JsValue
            get_local_storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::Write { key: key.to_string() })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            get_local_storage()?
                .remove_item(key)
                .map_err(|_| StorageError::Remove { key: key.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("token", "abc").unwrap();
        assert_eq!(other.get("token").unwrap().as_deref(), Some("abc"));

        other.remove("token").unwrap();
        assert!(!storage.contains("token"));
        assert!(storage.is_empty());
    }

    #[test]
    fn removing_missing_key_is_not_an_error() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("user").is_ok());
        assert_eq!(storage.get("user").unwrap(), None);
    }
}
