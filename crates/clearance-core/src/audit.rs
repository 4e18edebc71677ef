//! Document audit trail over the key-value store.
//!
//! Every editor action (saves, restores, AI edits, exports) is appended to
//! a per-document trail stored as a JSON array under `audit_{document_id}`,
//! newest first. Corrupt stored data degrades to an empty trail with a
//! warning; history loss is preferable to blocking the editor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClearanceError;
use crate::store::KvStore;

/// Category of an audited editor action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    Edit,
    Save,
    Restore,
    AiAction,
    Upload,
    Export,
    View,
    Comment,
    Approve,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edit => write!(f, "edit"),
            Self::Save => write!(f, "save"),
            Self::Restore => write!(f, "restore"),
            Self::AiAction => write!(f, "ai-action"),
            Self::Upload => write!(f, "upload"),
            Self::Export => write!(f, "export"),
            Self::View => write!(f, "view"),
            Self::Comment => write!(f, "comment"),
            Self::Approve => write!(f, "approve"),
        }
    }
}

/// One audited editor action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub action: AuditAction,
    /// Short human description, e.g. "Saved version v2.0".
    pub summary: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    /// Section the document is linked to, if any.
    pub section_id: Option<String>,
    /// Whether the copilot initiated the action.
    pub ai_triggered: bool,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        summary: impl Into<String>,
        user: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("{}", timestamp.timestamp_millis()),
            action,
            summary: summary.into(),
            user: user.into(),
            timestamp,
            section_id: None,
            ai_triggered: false,
        }
    }

    pub fn with_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn ai_triggered(mut self) -> Self {
        self.ai_triggered = true;
        self
    }
}

/// Per-document audit trail, newest entry first.
#[derive(Debug, Clone)]
pub struct AuditTrail {
    key: String,
}

impl AuditTrail {
    pub fn for_document(document_id: &str) -> Self {
        Self {
            key: format!("audit_{}", document_id),
        }
    }

    /// Load the trail. Missing or corrupt data yields an empty trail.
    pub fn entries(&self, store: &dyn KvStore) -> Result<Vec<AuditEntry>, ClearanceError> {
        let Some(raw) = store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "corrupt audit trail, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    /// Prepend an entry and persist the trail.
    pub fn record(&self, store: &mut dyn KvStore, entry: AuditEntry) -> Result<(), ClearanceError> {
        let mut entries = self.entries(store)?;
        entries.insert(0, entry);
        store.set(&self.key, &serde_json::to_string(&entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::timefmt::parse_datetime;

    fn ts(s: &str) -> DateTime<Utc> {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn test_empty_trail() {
        let store = MemoryStore::new();
        let trail = AuditTrail::for_document("doc-1");
        assert!(trail.entries(&store).unwrap().is_empty());
    }

    #[test]
    fn test_record_is_newest_first() {
        let mut store = MemoryStore::new();
        let trail = AuditTrail::for_document("doc-1");

        trail
            .record(
                &mut store,
                AuditEntry::new(AuditAction::Save, "Saved v1.0", "ana", ts("2026-03-01T10:00:00Z")),
            )
            .unwrap();
        trail
            .record(
                &mut store,
                AuditEntry::new(AuditAction::Edit, "Edited intro", "ana", ts("2026-03-01T11:00:00Z"))
                    .with_section("s1")
                    .ai_triggered(),
            )
            .unwrap();

        let entries = trail.entries(&store).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, AuditAction::Edit);
        assert!(entries[0].ai_triggered);
        assert_eq!(entries[0].section_id.as_deref(), Some("s1"));
        assert_eq!(entries[1].action, AuditAction::Save);
    }

    #[test]
    fn test_trails_are_isolated_per_document() {
        let mut store = MemoryStore::new();
        let first = AuditTrail::for_document("doc-1");
        let second = AuditTrail::for_document("doc-2");

        first
            .record(
                &mut store,
                AuditEntry::new(AuditAction::View, "Opened", "ana", ts("2026-03-01T10:00:00Z")),
            )
            .unwrap();

        assert_eq!(first.entries(&store).unwrap().len(), 1);
        assert!(second.entries(&store).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_trail_degrades_to_empty() {
        let mut store = MemoryStore::new();
        store.set("audit_doc-1", "{not json").unwrap();

        let trail = AuditTrail::for_document("doc-1");
        assert!(trail.entries(&store).unwrap().is_empty());

        // Recording over corruption starts a fresh trail.
        trail
            .record(
                &mut store,
                AuditEntry::new(AuditAction::Save, "Saved", "ana", ts("2026-03-01T10:00:00Z")),
            )
            .unwrap();
        assert_eq!(trail.entries(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_audit_action_display() {
        assert_eq!(AuditAction::AiAction.to_string(), "ai-action");
        assert_eq!(AuditAction::Save.to_string(), "save");
    }
}
