use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::modules::accounts::{hierarchy, Principal};

use super::service::ReviewService;
use super::store::{Directory, DocumentDecision, DocumentStore, PlacementDecision, PlacementStore};

#[derive(Debug, Deserialize, Default)]
pub struct DecisionFeedback {
    pub feedback: Option<String>,
}

fn ensure_reviewer(principal: &Principal) -> AppResult<()> {
    if hierarchy::can_review(principal.role) {
        Ok(())
    } else {
        Err(AppError::Permission(format!(
            "role {:?} cannot review submissions",
            principal.role
        )))
    }
}

pub async fn approve_document<D, P, U>(
    principal: Principal,
    State(service): State<Arc<ReviewService<D, P, U>>>,
    Path(document_id): Path<Uuid>,
) -> AppResult<Json<DocumentDecision>>
where
    D: DocumentStore + 'static,
    P: PlacementStore + 'static,
    U: Directory + 'static,
{
    ensure_reviewer(&principal)?;
    let decision = service.approve_document(document_id).await?;
    Ok(Json(decision))
}

pub async fn reject_document<D, P, U>(
    principal: Principal,
    State(service): State<Arc<ReviewService<D, P, U>>>,
    Path(document_id): Path<Uuid>,
    Json(payload): Json<DecisionFeedback>,
) -> AppResult<Json<DocumentDecision>>
where
    D: DocumentStore + 'static,
    P: PlacementStore + 'static,
    U: Directory + 'static,
{
    ensure_reviewer(&principal)?;
    let decision = service
        .reject_document(document_id, payload.feedback)
        .await?;
    Ok(Json(decision))
}

pub async fn approve_internship_form<D, P, U>(
    principal: Principal,
    State(service): State<Arc<ReviewService<D, P, U>>>,
    Path(internship_id): Path<Uuid>,
) -> AppResult<Json<PlacementDecision>>
where
    D: DocumentStore + 'static,
    P: PlacementStore + 'static,
    U: Directory + 'static,
{
    ensure_reviewer(&principal)?;
    let decision = service.approve_internship_form(internship_id).await?;
    Ok(Json(decision))
}

pub async fn reject_internship_form<D, P, U>(
    principal: Principal,
    State(service): State<Arc<ReviewService<D, P, U>>>,
    Path(internship_id): Path<Uuid>,
    Json(payload): Json<DecisionFeedback>,
) -> AppResult<Json<PlacementDecision>>
where
    D: DocumentStore + 'static,
    P: PlacementStore + 'static,
    U: Directory + 'static,
{
    ensure_reviewer(&principal)?;
    let decision = service
        .reject_internship_form(internship_id, payload.feedback)
        .await?;
    Ok(Json(decision))
}
