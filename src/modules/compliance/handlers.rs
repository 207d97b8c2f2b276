use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::modules::accounts::Principal;
use crate::modules::review::store::StoreError;

use super::service::{ComplianceService, ComplianceSource};
use super::summary::SectionComplianceSummary;

pub async fn section_compliance<S>(
    _principal: Principal,
    State(service): State<Arc<ComplianceService<S>>>,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<SectionComplianceSummary>>
where
    S: ComplianceSource + 'static,
{
    let summary = service
        .section_summary(section_id)
        .await
        .map_err(|err| match err {
            StoreError::NotFound => AppError::NotFound("section".to_string()),
            StoreError::Unavailable(msg) => AppError::Persistence(msg),
        })?;
    Ok(Json(summary))
}
