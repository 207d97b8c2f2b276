use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_trainee_requirements, signed_url, upload_document};
use super::service::{SubmissionReadStore, SubmissionService, SubmissionWriteStore};

pub fn submission_routes<R, W>(service: Arc<SubmissionService<R, W>>) -> Router
where
    R: SubmissionReadStore + 'static,
    W: SubmissionWriteStore + 'static,
{
    Router::new()
        .route("/files/signed-url", get(signed_url::<R, W>))
        .route(
            "/sections/:id/requirements",
            get(list_trainee_requirements::<R, W>),
        )
        .route(
            "/enrollments/:enrollment_id/requirements/:requirement_type_id/documents",
            post(upload_document::<R, W>),
        )
        .with_state(service)
}
