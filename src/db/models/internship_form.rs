use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime, Time};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "internship_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InternshipStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

/// A trainee-authored placement proposal, reviewed independently of
/// requirement documents.
///
/// Unlike documents, the form carries its status directly on the row. The
/// `temp_email` holds the proposed supervisor's address until approval
/// resolves it to a real account, after which it is cleared.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct InternshipForm {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub company_name: String,
    pub company_address: String,
    pub start_date: Date,
    pub end_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub days_of_week: Vec<String>,
    pub status: InternshipStatus,
    pub supervisor_id: Option<Uuid>,
    pub temp_email: Option<String>,
    pub feedback: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewInternshipForm {
    pub enrollment_id: Uuid,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub company_address: String,
    pub start_date: Date,
    pub end_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub days_of_week: Vec<String>,
    #[validate(email)]
    pub temp_email: Option<String>,
}
