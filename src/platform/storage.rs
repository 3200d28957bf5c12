//! Key-value storage
//!
//! `LocalStore` wraps `window.localStorage`; `MemoryStore` stands in when it
//! is unavailable (private browsing, native builds, tests).

use std::collections::HashMap;

#[cfg_attr(not(any(target_arch = "wasm32", test)), allow(unused_imports))]
use crate::error::{Error, Result};

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Session-only store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let storage = window
            .local_storage()
            .map_err(|e| Error::Storage(format!("{:?}", e)))?
            .ok_or_else(|| Error::Storage("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

/// LocalStorage when available, otherwise an in-memory fallback
pub fn open_default() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match LocalStore::open() {
            Ok(store) => return Box::new(store),
            Err(e) => log::warn!("{}; completion will not persist past this visit", e),
        }
    }
    Box::new(MemoryStore::new())
}

/// Store whose every call fails (exercises best-effort callers)
#[cfg(test)]
pub(crate) struct BrokenStore;

#[cfg(test)]
impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Storage("unavailable".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Storage("unavailable".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(Error::Storage("unavailable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("accessed").unwrap(), None);
        store.set("accessed", "true").unwrap();
        assert_eq!(store.get("accessed").unwrap().as_deref(), Some("true"));
        store.remove("accessed").unwrap();
        assert_eq!(store.get("accessed").unwrap(), None);
    }

    #[test]
    fn test_native_default_is_memory() {
        let mut store = open_default();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
