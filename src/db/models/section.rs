use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub school_year: String,
    pub coordinator_user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSection {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub school_year: String,
    pub coordinator_user_id: Uuid,
}
