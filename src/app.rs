use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, middleware, routing::get, Json, Router};
use tower_http::services::ServeDir;

use crate::app_state::AppState;
use crate::db::repositories::{DocumentRepository, PlacementRepository, SectionRepository, UserRepository};
use crate::middleware::tracing::observability_middleware;
use crate::modules::accounts::account_routes;
use crate::modules::compliance::routes::compliance_routes;
use crate::modules::compliance::service::ComplianceService;
use crate::modules::partners::partner_routes;
use crate::modules::review::routes::review_routes;
use crate::modules::review::service::ReviewService;
use crate::modules::sections::section_routes;
use crate::modules::submissions::routes::submission_routes;
use crate::modules::submissions::service::SubmissionService;

pub fn create_router(state: AppState) -> Router {
    let documents = Arc::new(DocumentRepository::new(state.db.clone()));
    let placements = Arc::new(PlacementRepository::new(state.db.clone()));
    let sections = Arc::new(SectionRepository::new(state.db.clone()));
    let users = Arc::new(UserRepository::new(state.db.clone()));

    let review = Arc::new(ReviewService::new(
        documents.clone(),
        placements.clone(),
        users.clone(),
    ));
    let compliance = Arc::new(ComplianceService::new(sections.clone()));
    let submissions = Arc::new(SubmissionService::new(
        state.storage.clone(),
        sections.clone(),
        documents.clone(),
        Duration::from_secs(state.env.storage.signed_url_expiry_secs),
    ));

    let api = Router::new()
        .merge(account_routes())
        .merge(section_routes())
        .merge(partner_routes())
        .with_state(state.clone())
        .merge(review_routes(review))
        .merge(compliance_routes(compliance))
        .merge(submission_routes(submissions));

    Router::new()
        .route("/health", get(health_check).with_state(state.clone()))
        .nest("/api/v1", api)
        .nest_service("/files", ServeDir::new(&state.env.storage.root_dir))
        .layer(middleware::from_fn(observability_middleware))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "service": state.env.app.name,
    })))
}
