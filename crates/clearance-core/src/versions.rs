//! Document version history over the key-value store.
//!
//! Saved versions live as a JSON array under `versions_{document_id}`,
//! newest first, mirroring the audit trail layout. A document with no
//! stored history gets a seed "Initial Version" entry on first load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClearanceError;
use crate::store::KvStore;

/// How a version came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionKind {
    Manual,
    AutoSave,
    AiGenerated,
}

/// One saved document version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Version label, e.g. "v1.0".
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub kind: VersionKind,
    pub description: Option<String>,
}

/// Per-document version history, newest entry first.
#[derive(Debug, Clone)]
pub struct VersionHistory {
    key: String,
}

impl VersionHistory {
    pub fn for_document(document_id: &str) -> Self {
        Self {
            key: format!("versions_{}", document_id),
        }
    }

    /// Load the history. Missing or corrupt data yields an empty history.
    pub fn versions(&self, store: &dyn KvStore) -> Result<Vec<DocumentVersion>, ClearanceError> {
        let Some(raw) = store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(versions) => Ok(versions),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "corrupt version history, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    /// Prepend a version and persist the history.
    pub fn save(
        &self,
        store: &mut dyn KvStore,
        version: DocumentVersion,
    ) -> Result<(), ClearanceError> {
        let mut versions = self.versions(store)?;
        versions.insert(0, version);
        store.set(&self.key, &serde_json::to_string(&versions)?)
    }

    /// Fetch one version by its label.
    pub fn get(
        &self,
        store: &dyn KvStore,
        id: &str,
    ) -> Result<Option<DocumentVersion>, ClearanceError> {
        Ok(self.versions(store)?.into_iter().find(|v| v.id == id))
    }

    /// Seed an "Initial Version" entry when no history exists yet.
    /// Returns the stored history either way.
    pub fn ensure_initial(
        &self,
        store: &mut dyn KvStore,
        content: &str,
        created_by: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<DocumentVersion>, ClearanceError> {
        let versions = self.versions(store)?;
        if !versions.is_empty() {
            return Ok(versions);
        }
        let initial = DocumentVersion {
            id: "v1.0".to_string(),
            name: "Initial Version".to_string(),
            content: content.to_string(),
            created_at,
            created_by: created_by.to_string(),
            kind: VersionKind::Manual,
            description: Some("Initial document version".to_string()),
        };
        self.save(store, initial)?;
        self.versions(store)
    }
}
