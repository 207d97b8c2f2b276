use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use crate::db::models::DocumentStatus;
use crate::modules::review::routes::review_routes;

use super::common::{
    make_document, service, MemoryDirectory, MemoryDocuments, MemoryPlacements,
};

fn router(documents: Arc<MemoryDocuments>) -> Router {
    let svc = Arc::new(service(
        documents,
        Arc::new(MemoryPlacements::default()),
        Arc::new(MemoryDirectory::default()),
    ));
    review_routes(svc)
}

fn approve_request(document_id: Uuid) -> axum::http::request::Builder {
    Request::builder()
        .method("POST")
        .uri(format!("/documents/{}/approve", document_id))
}

#[tokio::test]
async fn requests_without_identity_headers_are_unauthorized() {
    let app = router(Arc::new(MemoryDocuments::default()));

    let response = app
        .oneshot(approve_request(Uuid::new_v4()).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn trainees_cannot_approve_documents() {
    let document = make_document();
    let app = router(Arc::new(MemoryDocuments::with_documents(vec![
        document.clone()
    ])));

    let response = app
        .oneshot(
            approve_request(document.id)
                .header("x-user-id", Uuid::new_v4().to_string())
                .header("x-user-role", "trainee")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn coordinators_can_approve_documents() {
    let document = make_document();
    let documents = Arc::new(MemoryDocuments::with_documents(vec![document.clone()]));
    let app = router(documents.clone());

    let response = app
        .oneshot(
            approve_request(document.id)
                .header("x-user-id", Uuid::new_v4().to_string())
                .header("x-user-role", "coordinator")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let entries = documents.entries_for(document.id);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].document_status, DocumentStatus::Approved);
}

#[tokio::test]
async fn approving_an_unknown_document_is_a_404() {
    let app = router(Arc::new(MemoryDocuments::default()));

    let response = app
        .oneshot(
            approve_request(Uuid::new_v4())
                .header("x-user-id", Uuid::new_v4().to_string())
                .header("x-user-role", "admin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
