use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "ojt_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OjtStatus {
    NotStarted,
    Active,
    Completed,
    Dropped,
}

/// The binding of one trainee to one section for one program run.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub section_id: Uuid,
    pub trainee_user_id: Uuid,
    pub ojt_status: OjtStatus,
    pub required_hours: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewEnrollment {
    pub section_id: Uuid,
    pub trainee_user_id: Uuid,
    #[validate(range(min = 1))]
    pub required_hours: i32,
}
