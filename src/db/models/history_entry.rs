use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "document_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Approved,
    Rejected,
    Pending,
    NotSubmitted,
    RevisionRequested,
    Archived,
}

/// One immutable audit record of a status decision on a document.
/// Entries are only ever appended; the current status of a document is the
/// `document_status` of the entry with the maximum timestamp.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub document_id: Uuid,
    pub document_status: DocumentStatus,
    pub title: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub document_id: Uuid,
    pub document_status: DocumentStatus,
    pub title: String,
    pub description: String,
}

/// Derive a document's current status from its history log.
///
/// Returns `NotSubmitted` for an empty log. Ordering is by `created_at`
/// alone; when two reviewers decide concurrently, the later timestamp wins.
pub fn current_status(entries: &[HistoryEntry]) -> DocumentStatus {
    entries
        .iter()
        .max_by_key(|e| e.created_at)
        .map(|e| e.document_status)
        .unwrap_or(DocumentStatus::NotSubmitted)
}

/// The latest entry in a history log, if any.
pub fn latest_entry(entries: &[HistoryEntry]) -> Option<&HistoryEntry> {
    entries.iter().max_by_key(|e| e.created_at)
}
