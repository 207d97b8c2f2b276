use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    Enrollment, InternshipForm, NewEnrollment, NewInternshipForm, NewRequirementType, NewSection,
    RequirementType, Section, UserRole,
};
use crate::db::repositories::{PlacementRepository, SectionRepository};
use crate::error::{AppError, AppResult};
use crate::modules::accounts::Principal;

fn ensure_coordinator(principal: &Principal) -> AppResult<()> {
    match principal.role {
        UserRole::Admin | UserRole::Coordinator => Ok(()),
        other => Err(AppError::Permission(format!(
            "role {:?} cannot manage sections",
            other
        ))),
    }
}

pub async fn create_section(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<NewSection>,
) -> AppResult<Json<Section>> {
    ensure_coordinator(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let section = SectionRepository::new(state.db.clone())
        .create_section(&payload)
        .await?;
    info!(actor = %principal.user_id, section_id = %section.id, "section created");
    Ok(Json(section))
}

pub async fn list_sections(
    _principal: Principal,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Section>>> {
    let sections = SectionRepository::new(state.db.clone()).list_sections().await?;
    Ok(Json(sections))
}

pub async fn create_enrollment(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<NewEnrollment>,
) -> AppResult<Json<Enrollment>> {
    ensure_coordinator(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let enrollment = SectionRepository::new(state.db.clone())
        .create_enrollment(&payload)
        .await?;
    info!(actor = %principal.user_id, enrollment_id = %enrollment.id, "trainee enrolled");
    Ok(Json(enrollment))
}

pub async fn create_requirement_type(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<NewRequirementType>,
) -> AppResult<Json<RequirementType>> {
    ensure_coordinator(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let requirement_type = SectionRepository::new(state.db.clone())
        .create_requirement_type(&payload)
        .await?;
    Ok(Json(requirement_type))
}

pub async fn list_requirement_types(
    _principal: Principal,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RequirementType>>> {
    let types = SectionRepository::new(state.db.clone())
        .list_requirement_types()
        .await?;
    Ok(Json(types))
}

/// Trainees draft their own placement proposal; it starts `not_submitted`.
pub async fn create_internship_form(
    _principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<NewInternshipForm>,
) -> AppResult<Json<InternshipForm>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let form = PlacementRepository::new(state.db.clone())
        .create(&payload)
        .await?;
    Ok(Json(form))
}

pub async fn submit_internship_form(
    principal: Principal,
    State(state): State<AppState>,
    Path(internship_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    PlacementRepository::new(state.db.clone())
        .submit(internship_id)
        .await?;
    info!(actor = %principal.user_id, %internship_id, "internship form submitted for review");
    Ok(Json(serde_json::json!({
        "internship_id": internship_id,
        "status": "pending",
    })))
}
