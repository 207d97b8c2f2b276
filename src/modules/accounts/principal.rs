use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::db::models::UserRole;
use crate::error::AppError;

/// The authenticated caller, as asserted by the session gateway in front of
/// this service. Identity verification itself is an external concern; the
/// gateway forwards the resolved user id and role as trusted headers.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: UserRole,
}

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

fn parse_role(value: &str) -> Option<UserRole> {
    match value {
        "admin" => Some(UserRole::Admin),
        "coordinator" => Some(UserRole::Coordinator),
        "supervisor" => Some(UserRole::Supervisor),
        "trainee" => Some(UserRole::Trainee),
        _ => None,
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or_else(|| AppError::Authentication("missing or invalid user id".to_string()))?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_role)
            .ok_or_else(|| AppError::Authentication("missing or invalid user role".to_string()))?;

        Ok(Principal { user_id, role })
    }
}
