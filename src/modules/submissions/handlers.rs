use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::models::Document;
use crate::error::{AppError, AppResult};
use crate::modules::accounts::{hierarchy, Principal};

use super::service::{SignedUrl, SubmissionReadStore, SubmissionService, SubmissionWriteStore};
use super::view::TraineeRequirements;

#[derive(Debug, Deserialize)]
pub struct SignedUrlQuery {
    pub path: String,
    pub expires_in_secs: Option<u64>,
}

pub async fn signed_url<R, W>(
    _principal: Principal,
    State(service): State<Arc<SubmissionService<R, W>>>,
    Query(query): Query<SignedUrlQuery>,
) -> AppResult<Json<SignedUrl>>
where
    R: SubmissionReadStore + 'static,
    W: SubmissionWriteStore + 'static,
{
    let expiry = query.expires_in_secs.map(Duration::from_secs);
    let signed = service.signed_url(&query.path, expiry).await?;
    Ok(Json(signed))
}

pub async fn list_trainee_requirements<R, W>(
    principal: Principal,
    State(service): State<Arc<SubmissionService<R, W>>>,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<Vec<TraineeRequirements>>>
where
    R: SubmissionReadStore + 'static,
    W: SubmissionWriteStore + 'static,
{
    if !hierarchy::can_review(principal.role) {
        return Err(AppError::Permission(format!(
            "role {:?} cannot list section submissions",
            principal.role
        )));
    }
    let listing = service.list_trainee_requirements(section_id).await?;
    Ok(Json(listing))
}

pub async fn upload_document<R, W>(
    _principal: Principal,
    State(service): State<Arc<SubmissionService<R, W>>>,
    Path((enrollment_id, requirement_type_id)): Path<(Uuid, Uuid)>,
    mut multipart: Multipart,
) -> AppResult<Json<Document>>
where
    R: SubmissionReadStore + 'static,
    W: SubmissionWriteStore + 'static,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field is missing a filename".to_string()))?;
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?
            .to_vec();

        if data.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        let document = service
            .upload_document(enrollment_id, requirement_type_id, file_name, mime_type, data)
            .await?;
        return Ok(Json(document));
    }

    Err(AppError::Validation(
        "multipart request is missing a file field".to_string(),
    ))
}
