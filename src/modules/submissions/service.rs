use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::models::{
    Document, DocumentStatus, HistoryEntry, NewDocument, NewHistoryEntry, RequirementType,
};
use crate::error::AppError;
use crate::modules::review::store::StoreError;
use crate::storage::{Storage, StorageError};

use super::view::{assemble, SectionSubmissions, TraineeRequirements};

pub const SUBMITTED_TITLE: &str = "Document submitted";
pub const SUBMITTED_MESSAGE: &str = "Awaiting review.";

/// Read side of the section requirements listing.
#[async_trait]
pub trait SubmissionReadStore: Send + Sync {
    /// Load every enrollment, document, history entry, and form for a
    /// section; `None` when the section does not exist.
    async fn load_section(
        &self,
        section_id: Uuid,
    ) -> Result<Option<SectionSubmissions>, StoreError>;
}

/// Write side of document intake.
#[async_trait]
pub trait SubmissionWriteStore: Send + Sync {
    async fn enrollment_exists(&self, enrollment_id: Uuid) -> Result<bool, StoreError>;
    async fn requirement_type(
        &self,
        requirement_type_id: Uuid,
    ) -> Result<Option<RequirementType>, StoreError>;
    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError>;
    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, StoreError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct SignedUrl {
    pub url: String,
    pub expires_in_secs: u64,
}

pub struct SubmissionService<R, W> {
    storage: Arc<dyn Storage>,
    reader: Arc<R>,
    writer: Arc<W>,
    default_expiry: Duration,
}

impl<R, W> SubmissionService<R, W>
where
    R: SubmissionReadStore + 'static,
    W: SubmissionWriteStore + 'static,
{
    pub fn new(
        storage: Arc<dyn Storage>,
        reader: Arc<R>,
        writer: Arc<W>,
        default_expiry: Duration,
    ) -> Self {
        Self {
            storage,
            reader,
            writer,
            default_expiry,
        }
    }

    /// Existence-check the object, then issue a time-bounded access URL.
    pub async fn signed_url(
        &self,
        file_path: &str,
        expiry: Option<Duration>,
    ) -> Result<SignedUrl, SubmissionError> {
        if !self.storage.exists(file_path).await? {
            return Err(SubmissionError::NotFound("file"));
        }

        let expires_in = expiry.unwrap_or(self.default_expiry);
        let url = self.storage.create_signed_url(file_path, expires_in).await?;
        Ok(SignedUrl {
            url,
            expires_in_secs: expires_in.as_secs(),
        })
    }

    /// The full per-trainee requirement listing for a section.
    pub async fn list_trainee_requirements(
        &self,
        section_id: Uuid,
    ) -> Result<Vec<TraineeRequirements>, SubmissionError> {
        let section = self
            .reader
            .load_section(section_id)
            .await?
            .ok_or(SubmissionError::NotFound("section"))?;
        Ok(assemble(&section))
    }

    /// Store an uploaded file, create its document row, and append the
    /// implicit initial `pending` history entry.
    pub async fn upload_document(
        &self,
        enrollment_id: Uuid,
        requirement_type_id: Uuid,
        file_name: String,
        mime_type: String,
        data: Vec<u8>,
    ) -> Result<Document, SubmissionError> {
        if !self.writer.enrollment_exists(enrollment_id).await? {
            return Err(SubmissionError::NotFound("enrollment"));
        }
        self.writer
            .requirement_type(requirement_type_id)
            .await?
            .ok_or(SubmissionError::NotFound("requirement type"))?;

        let file_size = data.len() as i64;
        let storage_key = format!(
            "documents/{}/{}_{}",
            enrollment_id,
            Uuid::new_v4(),
            file_name
        );
        self.storage.upload(&storage_key, data).await?;

        let document = match self
            .writer
            .create_document(NewDocument {
                enrollment_id,
                requirement_type_id,
                file_path: storage_key.clone(),
                file_name,
                file_size,
                mime_type,
            })
            .await
        {
            Ok(document) => document,
            Err(err) => {
                // The row is the source of truth; drop the orphaned file.
                if let Err(cleanup) = self.storage.remove(&[storage_key.clone()]).await {
                    warn!(%storage_key, %cleanup, "orphaned upload left behind");
                }
                return Err(err.into());
            }
        };

        self.writer
            .append_history(NewHistoryEntry {
                document_id: document.id,
                document_status: DocumentStatus::Pending,
                title: SUBMITTED_TITLE.to_string(),
                description: SUBMITTED_MESSAGE.to_string(),
            })
            .await?;

        info!(document_id = %document.id, %enrollment_id, "document submitted");
        Ok(document)
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<StorageError> for SubmissionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => SubmissionError::NotFound("file"),
            StorageError::AccessDenied(msg) => SubmissionError::Permission(msg),
            other => SubmissionError::Persistence(other.to_string()),
        }
    }
}

impl From<StoreError> for SubmissionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => SubmissionError::NotFound("record"),
            StoreError::Unavailable(msg) => SubmissionError::Persistence(msg),
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::NotFound(what) => AppError::NotFound(what.to_string()),
            SubmissionError::Permission(msg) => AppError::Permission(msg),
            SubmissionError::Persistence(msg) => AppError::Persistence(msg),
        }
    }
}
