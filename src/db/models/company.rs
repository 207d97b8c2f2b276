use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// An industry partner hosting trainees.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    /// Storage key of the signed memorandum of agreement, if on file.
    pub moa_file_path: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCompany {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    pub contact_person: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub moa_file_path: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub moa_file_path: Option<String>,
}
