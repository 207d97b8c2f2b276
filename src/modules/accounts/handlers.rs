use axum::{
    extract::{Path, State},
    Json,
};
use secrecy::ExposeSecret;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{NewUser, User};
use crate::db::repositories::UserRepository;
use crate::error::{AppError, AppResult};

use super::hierarchy;
use super::principal::Principal;

pub async fn create_user(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<Json<User>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !hierarchy::can_manage(principal.role, payload.role) {
        return Err(AppError::Permission(format!(
            "role {:?} cannot create {:?} accounts",
            principal.role, payload.role
        )));
    }

    let password_hash = bcrypt::hash(payload.password.expose_secret(), bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Persistence(format!("password hashing failed: {e}")))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(&payload, password_hash).await?;

    info!(actor = %principal.user_id, user_id = %user.id, role = ?user.role, "account created");
    Ok(Json(user))
}

pub async fn list_users(
    principal: Principal,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<User>>> {
    if hierarchy::manageable_roles(principal.role).is_empty() {
        return Err(AppError::Permission(format!(
            "role {:?} cannot list accounts",
            principal.role
        )));
    }

    let repo = UserRepository::new(state.db.clone());
    let users = repo.list().await?;
    Ok(Json(users))
}

pub async fn delete_user(
    principal: Principal,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = UserRepository::new(state.db.clone());

    let target = repo
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_string()))?;

    if !hierarchy::can_manage(principal.role, target.role) {
        return Err(AppError::Permission(format!(
            "role {:?} cannot delete {:?} accounts",
            principal.role, target.role
        )));
    }

    if let Err(err) = repo.delete(user_id).await {
        error!(actor = %principal.user_id, %user_id, %err, "account deletion failed");
        return Err(AppError::Persistence("Failed to delete user".to_string()));
    }

    info!(actor = %principal.user_id, %user_id, "account deleted");
    Ok(Json(serde_json::json!({ "deleted": user_id })))
}
