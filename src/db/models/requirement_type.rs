use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// A named category of document a trainee must submit (e.g. "Resume", "MOA").
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct RequirementType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Storage key of an optional downloadable template.
    pub template_path: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewRequirementType {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub template_path: Option<String>,
}
