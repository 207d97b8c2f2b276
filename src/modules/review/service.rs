use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::models::{DocumentStatus, InternshipStatus, NewHistoryEntry, OjtStatus, UserRole};
use crate::error::AppError;

use super::store::{
    Directory, DocumentDecision, DocumentStore, PlacementDecision, PlacementStore, StoreError,
};

pub const APPROVED_TITLE: &str = "Document approved";
pub const APPROVED_MESSAGE: &str = "Your submission has been reviewed and approved.";
pub const REJECTED_TITLE: &str = "Document rejected";
pub const REJECTED_GENERIC_MESSAGE: &str =
    "Your submission has been rejected. Please submit a corrected file.";

/// Review transition logic for documents and internship forms.
///
/// Every write is a separate round trip to the backing store; there is no
/// surrounding transaction, so any step can fail independently and the
/// failure is surfaced unchanged. Concurrent decisions on the same document
/// both append; the entry with the latest timestamp wins on read.
pub struct ReviewService<D, P, U> {
    documents: Arc<D>,
    placements: Arc<P>,
    directory: Arc<U>,
}

impl<D, P, U> ReviewService<D, P, U>
where
    D: DocumentStore + 'static,
    P: PlacementStore + 'static,
    U: Directory + 'static,
{
    pub fn new(documents: Arc<D>, placements: Arc<P>, directory: Arc<U>) -> Self {
        Self {
            documents,
            placements,
            directory,
        }
    }

    pub async fn approve_document(
        &self,
        document_id: Uuid,
    ) -> Result<DocumentDecision, ReviewError> {
        self.documents
            .fetch(document_id)
            .await?
            .ok_or(ReviewError::NotFound("document"))?;

        self.documents
            .append_history(NewHistoryEntry {
                document_id,
                document_status: DocumentStatus::Approved,
                title: APPROVED_TITLE.to_string(),
                description: APPROVED_MESSAGE.to_string(),
            })
            .await?;

        info!(%document_id, "document approved");
        Ok(DocumentDecision {
            document_id,
            status: DocumentStatus::Approved,
        })
    }

    pub async fn reject_document(
        &self,
        document_id: Uuid,
        feedback: Option<String>,
    ) -> Result<DocumentDecision, ReviewError> {
        self.documents
            .fetch(document_id)
            .await?
            .ok_or(ReviewError::NotFound("document"))?;

        // Feedback is embedded verbatim; length limits are a UI concern.
        let description = feedback.unwrap_or_else(|| REJECTED_GENERIC_MESSAGE.to_string());

        self.documents
            .append_history(NewHistoryEntry {
                document_id,
                document_status: DocumentStatus::Rejected,
                title: REJECTED_TITLE.to_string(),
                description,
            })
            .await?;

        info!(%document_id, "document rejected");
        Ok(DocumentDecision {
            document_id,
            status: DocumentStatus::Rejected,
        })
    }

    pub async fn approve_internship_form(
        &self,
        internship_id: Uuid,
    ) -> Result<PlacementDecision, ReviewError> {
        let form = self
            .placements
            .fetch(internship_id)
            .await?
            .ok_or(ReviewError::NotFound("internship form"))?;

        // At most one approved placement per enrollment.
        if let Some(existing) = self
            .placements
            .approved_form_for_enrollment(form.enrollment_id)
            .await?
        {
            if existing.id != form.id {
                return Err(ReviewError::Conflict(
                    "enrollment already has an approved placement".to_string(),
                ));
            }
        }

        let supervisor_id = match &form.temp_email {
            Some(email) => Some(self.resolve_supervisor(email).await?),
            None => form.supervisor_id,
        };

        self.placements
            .record_approval(internship_id, supervisor_id)
            .await?;
        self.placements
            .set_enrollment_status(form.enrollment_id, OjtStatus::Active)
            .await?;

        info!(%internship_id, enrollment_id = %form.enrollment_id, "internship form approved");
        Ok(PlacementDecision {
            internship_id,
            status: InternshipStatus::Approved,
        })
    }

    pub async fn reject_internship_form(
        &self,
        internship_id: Uuid,
        feedback: Option<String>,
    ) -> Result<PlacementDecision, ReviewError> {
        self.placements
            .fetch(internship_id)
            .await?
            .ok_or(ReviewError::NotFound("internship form"))?;

        self.placements
            .record_rejection(internship_id, feedback)
            .await?;

        info!(%internship_id, "internship form rejected");
        Ok(PlacementDecision {
            internship_id,
            status: InternshipStatus::Rejected,
        })
    }

    /// Resolve a proposed supervisor email to an account id, provisioning a
    /// new identity and profile when no account exists.
    ///
    /// The identity/profile insert pair is not transactional. On a profile
    /// failure the just-created identity is deleted best-effort; if that
    /// delete also fails the orphan is logged and the original error
    /// surfaces.
    async fn resolve_supervisor(&self, email: &str) -> Result<Uuid, ReviewError> {
        if let Some(user) = self.directory.find_by_email(email).await? {
            if user.role == UserRole::Supervisor {
                return Ok(user.id);
            }
            return Err(ReviewError::Permission(format!(
                "user {} exists but is not a supervisor",
                email
            )));
        }

        let user_id = self.directory.create_identity(email).await?;
        if let Err(err) = self.directory.create_supervisor_profile(user_id, email).await {
            warn!(%user_id, %email, "supervisor profile insert failed, removing identity");
            if let Err(cleanup) = self.directory.delete_identity(user_id).await {
                error!(%user_id, %email, %cleanup, "orphaned supervisor identity left behind");
            }
            return Err(err.into());
        }
        Ok(user_id)
    }
}

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(what) => AppError::NotFound(what.to_string()),
            ReviewError::Permission(msg) => AppError::Permission(msg),
            ReviewError::Conflict(msg) => AppError::Conflict(msg),
            ReviewError::Store(StoreError::NotFound) => {
                AppError::NotFound("record not found".to_string())
            }
            ReviewError::Store(StoreError::Unavailable(msg)) => AppError::Persistence(msg),
        }
    }
}
