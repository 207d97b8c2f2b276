use std::sync::Arc;

use axum::{routing::post, Router};

use super::handlers::{
    approve_document, approve_internship_form, reject_document, reject_internship_form,
};
use super::service::ReviewService;
use super::store::{Directory, DocumentStore, PlacementStore};

pub fn review_routes<D, P, U>(service: Arc<ReviewService<D, P, U>>) -> Router
where
    D: DocumentStore + 'static,
    P: PlacementStore + 'static,
    U: Directory + 'static,
{
    Router::new()
        .route("/documents/:id/approve", post(approve_document::<D, P, U>))
        .route("/documents/:id/reject", post(reject_document::<D, P, U>))
        .route(
            "/internships/:id/approve",
            post(approve_internship_form::<D, P, U>),
        )
        .route(
            "/internships/:id/reject",
            post(reject_internship_form::<D, P, U>),
        )
        .with_state(service)
}
