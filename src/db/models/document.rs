use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// One trainee's submitted file against one requirement type.
///
/// A document carries no status column; its current status is derived from
/// the latest entry in its history log.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub requirement_type_id: Uuid,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub submitted_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct NewDocument {
    pub enrollment_id: Uuid,
    pub requirement_type_id: Uuid,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
}
