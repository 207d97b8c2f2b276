use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{Company, NewCompany, UpdateCompany, UserRole};
use crate::db::repositories::CompanyRepository;
use crate::error::{AppError, AppResult};
use crate::modules::accounts::Principal;

fn ensure_admin(principal: &Principal) -> AppResult<()> {
    if principal.role == UserRole::Admin {
        Ok(())
    } else {
        Err(AppError::Permission(
            "only administrators can manage partner companies".to_string(),
        ))
    }
}

pub async fn create_company(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<NewCompany>,
) -> AppResult<Json<Company>> {
    ensure_admin(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let company = CompanyRepository::new(state.db.clone())
        .create(&payload)
        .await?;
    info!(actor = %principal.user_id, company_id = %company.id, "partner company created");
    Ok(Json(company))
}

pub async fn list_companies(
    _principal: Principal,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepository::new(state.db.clone()).list().await?;
    Ok(Json(companies))
}

pub async fn get_company(
    _principal: Principal,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepository::new(state.db.clone())
        .get_by_id(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound("company not found".to_string()))?;
    Ok(Json(company))
}

pub async fn update_company(
    principal: Principal,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompany>,
) -> AppResult<Json<Company>> {
    ensure_admin(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let company = CompanyRepository::new(state.db.clone())
        .update(company_id, &payload)
        .await?;
    Ok(Json(company))
}

pub async fn delete_company(
    principal: Principal,
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_admin(&principal)?;
    CompanyRepository::new(state.db.clone())
        .delete(company_id)
        .await?;
    info!(actor = %principal.user_id, %company_id, "partner company deleted");
    Ok(Json(serde_json::json!({ "deleted": company_id })))
}
