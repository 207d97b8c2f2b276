use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::{
    Document, DocumentStatus, HistoryEntry, InternshipForm, InternshipStatus, NewHistoryEntry,
    OjtStatus, User,
};

/// Error surface of the workflow store traits. Postgres-backed and in-memory
/// implementations both map onto this.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<crate::db::DatabaseError> for StoreError {
    fn from(err: crate::db::DatabaseError) -> Self {
        match err {
            crate::db::DatabaseError::NotFound => StoreError::NotFound,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Documents and their append-only history log.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self, document_id: Uuid) -> Result<Option<Document>, StoreError>;
    async fn history(&self, document_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError>;
    /// Append one entry. History is never mutated in place.
    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, StoreError>;
}

/// Internship forms and the enrollment rows their approval cascades into.
#[async_trait]
pub trait PlacementStore: Send + Sync {
    async fn fetch(&self, internship_id: Uuid) -> Result<Option<InternshipForm>, StoreError>;
    async fn approved_form_for_enrollment(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<InternshipForm>, StoreError>;
    /// Set `status = approved`, link the supervisor, clear `temp_email`.
    async fn record_approval(
        &self,
        internship_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<(), StoreError>;
    /// Set `status = rejected` and store the feedback on the row.
    async fn record_rejection(
        &self,
        internship_id: Uuid,
        feedback: Option<String>,
    ) -> Result<(), StoreError>;
    async fn set_enrollment_status(
        &self,
        enrollment_id: Uuid,
        status: OjtStatus,
    ) -> Result<(), StoreError>;
}

/// User directory: lookup plus the two-step supervisor provisioning surface.
///
/// Provisioning is split into identity and profile creation so the service
/// can compensate (delete the identity) when the profile insert fails.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Create a pre-confirmed supervisor identity with a random credential.
    async fn create_identity(&self, email: &str) -> Result<Uuid, StoreError>;
    async fn create_supervisor_profile(&self, user_id: Uuid, email: &str)
        -> Result<(), StoreError>;
    async fn delete_identity(&self, user_id: Uuid) -> Result<(), StoreError>;
}

/// Receipt returned from a document decision.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDecision {
    pub document_id: Uuid,
    pub status: DocumentStatus,
}

/// Receipt returned from an internship form decision.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementDecision {
    pub internship_id: Uuid,
    pub status: InternshipStatus,
}
