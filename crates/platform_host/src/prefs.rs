//! Preference documents: one JSON text per key, read and written synchronously.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Host storage for preference documents.
///
/// Both browser `localStorage` and the in-memory store answer immediately, so the contract is
/// synchronous.
pub trait PrefsStore {
    /// Returns the document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, String>;

    fn write(&self, key: &str, json: &str) -> Result<(), String>;
}

/// Reads the document under `key` and decodes it as `T`.
///
/// # Errors
///
/// Returns an error naming `key` when the store fails or the document does not decode.
pub fn read_pref<T: DeserializeOwned>(
    store: &dyn PrefsStore,
    key: &str,
) -> Result<Option<T>, String> {
    store
        .read(key)?
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(|e| format!("preference `{key}` is not valid: {e}"))
}

/// Encodes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns an error when encoding or the store write fails.
pub fn write_pref<T: Serialize>(store: &dyn PrefsStore, key: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.write(key, &json)
}

#[derive(Debug, Clone, Default)]
/// Session-only preference store. Clones share documents.
pub struct MemoryPrefsStore {
    documents: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Seeds `key` with a raw document.
    pub fn with_document(self, key: &str, json: &str) -> Self {
        self.documents
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
        self
    }

    pub fn document(&self, key: &str) -> Option<String> {
        self.documents.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.document(key))
    }

    fn write(&self, key: &str, json: &str) -> Result<(), String> {
        self.documents
            .borrow_mut()
            .insert(key.to_string(), json.to_string());
        Ok(())
    }
}
