use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::models::{Document, HistoryEntry, NewDocument, NewHistoryEntry, RequirementType};
use crate::db::DatabaseError;
use crate::modules::review::store::{DocumentStore, StoreError};
use crate::modules::submissions::service::SubmissionWriteStore;

const SELECT_DOCUMENT: &str = r#"
    SELECT id, enrollment_id, requirement_type_id, file_path, file_name, file_size, mime_type, submitted_at
    FROM documents
"#;

const SELECT_HISTORY: &str = r#"
    SELECT id, document_id, document_status, title, description, created_at
    FROM document_history
"#;

#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, document_id: Uuid) -> Result<Option<Document>, DatabaseError> {
        let document =
            sqlx::query_as::<Postgres, Document>(&format!("{SELECT_DOCUMENT} WHERE id = $1"))
                .bind(document_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(document)
    }

    pub async fn history_for(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<HistoryEntry>, DatabaseError> {
        let entries = sqlx::query_as::<Postgres, HistoryEntry>(&format!(
            "{SELECT_HISTORY} WHERE document_id = $1 ORDER BY created_at"
        ))
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn insert_history(
        &self,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntry, DatabaseError> {
        let inserted = sqlx::query_as::<Postgres, HistoryEntry>(
            r#"
            INSERT INTO document_history (document_id, document_status, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, document_id, document_status, title, description, created_at
            "#,
        )
        .bind(entry.document_id)
        .bind(entry.document_status)
        .bind(entry.title)
        .bind(entry.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    pub async fn insert_document(&self, document: NewDocument) -> Result<Document, DatabaseError> {
        let inserted = sqlx::query_as::<Postgres, Document>(
            r#"
            INSERT INTO documents (enrollment_id, requirement_type_id, file_path, file_name, file_size, mime_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, enrollment_id, requirement_type_id, file_path, file_name, file_size, mime_type, submitted_at
            "#,
        )
        .bind(document.enrollment_id)
        .bind(document.requirement_type_id)
        .bind(document.file_path)
        .bind(document.file_name)
        .bind(document.file_size)
        .bind(document.mime_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn fetch(&self, document_id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.get_by_id(document_id).await?)
    }

    async fn history(&self, document_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.history_for(document_id).await?)
    }

    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, StoreError> {
        Ok(self.insert_history(entry).await?)
    }
}

#[async_trait]
impl SubmissionWriteStore for DocumentRepository {
    async fn enrollment_exists(&self, enrollment_id: Uuid) -> Result<bool, StoreError> {
        let row: (bool,) =
            sqlx::query_as::<Postgres, (bool,)>("SELECT EXISTS(SELECT 1 FROM enrollments WHERE id = $1)")
                .bind(enrollment_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(row.0)
    }

    async fn requirement_type(
        &self,
        requirement_type_id: Uuid,
    ) -> Result<Option<RequirementType>, StoreError> {
        let requirement = sqlx::query_as::<Postgres, RequirementType>(
            r#"
            SELECT id, name, description, template_path, created_at
            FROM requirement_types
            WHERE id = $1
            "#,
        )
        .bind(requirement_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(requirement)
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError> {
        Ok(self.insert_document(document).await?)
    }

    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, StoreError> {
        Ok(self.insert_history(entry).await?)
    }
}
