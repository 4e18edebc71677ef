//! Key-value persistence seam.
//!
//! The browser shell keeps editor-side state (audit trails, version
//! history) in a string key-value store. The core only sees this trait, so
//! tests and non-browser embeddings substitute [`MemoryStore`].

use std::collections::HashMap;

use crate::error::ClearanceError;

/// Minimal string key-value store capability.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClearanceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ClearanceError>;
}

/// In-memory store for tests and headless embeddings.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClearanceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ClearanceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
