use std::sync::Arc;

use uuid::Uuid;

use crate::db::models::{current_status, DocumentStatus, InternshipStatus, OjtStatus, UserRole};
use crate::modules::review::service::{
    ReviewError, APPROVED_TITLE, REJECTED_GENERIC_MESSAGE, REJECTED_TITLE,
};
use crate::modules::review::store::StoreError;

use super::common::{
    make_document, make_form, make_user, service, MemoryDirectory, MemoryDocuments,
    MemoryPlacements,
};

#[tokio::test]
async fn approving_a_document_appends_without_touching_prior_entries() {
    let document = make_document();
    let documents = Arc::new(MemoryDocuments::with_documents(vec![document.clone()]));
    let svc = service(
        documents.clone(),
        Arc::new(MemoryPlacements::default()),
        Arc::new(MemoryDirectory::default()),
    );

    let initial = documents.seed_entry(document.id, DocumentStatus::Pending);

    let decision = svc.approve_document(document.id).await.expect("approve");
    assert_eq!(decision.status, DocumentStatus::Approved);

    let entries = documents.entries_for(document.id);
    assert_eq!(entries.len(), 2);
    // The original pending entry is intact.
    let first = entries.iter().find(|e| e.id == initial.id).unwrap();
    assert_eq!(first.document_status, DocumentStatus::Pending);

    assert_eq!(current_status(&entries), DocumentStatus::Approved);
    let latest = entries.iter().max_by_key(|e| e.created_at).unwrap();
    assert_eq!(latest.title, APPROVED_TITLE);
}

#[tokio::test]
async fn approving_a_missing_document_is_not_found() {
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        Arc::new(MemoryPlacements::default()),
        Arc::new(MemoryDirectory::default()),
    );

    let err = svc.approve_document(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ReviewError::NotFound("document")));
}

#[tokio::test]
async fn rejection_feedback_is_embedded_verbatim() {
    let document = make_document();
    let documents = Arc::new(MemoryDocuments::with_documents(vec![document.clone()]));
    let svc = service(
        documents.clone(),
        Arc::new(MemoryPlacements::default()),
        Arc::new(MemoryDirectory::default()),
    );

    svc.reject_document(document.id, Some("Wrong file format".to_string()))
        .await
        .expect("reject");

    let entries = documents.entries_for(document.id);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].document_status, DocumentStatus::Rejected);
    assert_eq!(entries[0].title, REJECTED_TITLE);
    assert_eq!(entries[0].description, "Wrong file format");
}

#[tokio::test]
async fn rejection_without_feedback_uses_the_generic_message() {
    let document = make_document();
    let documents = Arc::new(MemoryDocuments::with_documents(vec![document.clone()]));
    let svc = service(
        documents.clone(),
        Arc::new(MemoryPlacements::default()),
        Arc::new(MemoryDirectory::default()),
    );

    svc.reject_document(document.id, None).await.expect("reject");

    let entries = documents.entries_for(document.id);
    assert_eq!(entries[0].description, REJECTED_GENERIC_MESSAGE);
}

#[tokio::test]
async fn approval_reuses_an_existing_supervisor_account() {
    let supervisor = make_user("sup@acme.test", UserRole::Supervisor);
    let enrollment_id = Uuid::new_v4();
    let form = make_form(enrollment_id, InternshipStatus::Pending, Some("sup@acme.test"));

    let placements = Arc::new(MemoryPlacements::with_forms(vec![form.clone()]));
    let directory = Arc::new(MemoryDirectory::with_users(vec![supervisor.clone()]));
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        directory.clone(),
    );

    let decision = svc.approve_internship_form(form.id).await.expect("approve");
    assert_eq!(decision.status, InternshipStatus::Approved);

    let stored = placements.form(form.id).unwrap();
    assert_eq!(stored.status, InternshipStatus::Approved);
    assert_eq!(stored.supervisor_id, Some(supervisor.id));
    assert_eq!(stored.temp_email, None);
    assert_eq!(
        placements.enrollment_status(enrollment_id),
        Some(OjtStatus::Active)
    );
    assert!(directory.created_identities().is_empty());
}

#[tokio::test]
async fn approval_fails_when_the_email_belongs_to_a_non_supervisor() {
    let trainee = make_user("someone@acme.test", UserRole::Trainee);
    let enrollment_id = Uuid::new_v4();
    let form = make_form(
        enrollment_id,
        InternshipStatus::Pending,
        Some("someone@acme.test"),
    );

    let placements = Arc::new(MemoryPlacements::with_forms(vec![form.clone()]));
    let directory = Arc::new(MemoryDirectory::with_users(vec![trainee]));
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        directory.clone(),
    );

    let err = svc.approve_internship_form(form.id).await.unwrap_err();
    assert!(matches!(err, ReviewError::Permission(_)));

    // Nothing was written.
    let stored = placements.form(form.id).unwrap();
    assert_eq!(stored.status, InternshipStatus::Pending);
    assert_eq!(stored.temp_email.as_deref(), Some("someone@acme.test"));
    assert_eq!(placements.enrollment_status(enrollment_id), None);
    assert!(directory.created_identities().is_empty());
}

#[tokio::test]
async fn approval_provisions_a_supervisor_for_an_unknown_email() {
    let enrollment_id = Uuid::new_v4();
    let form = make_form(enrollment_id, InternshipStatus::Pending, Some("new@acme.test"));

    let placements = Arc::new(MemoryPlacements::with_forms(vec![form.clone()]));
    let directory = Arc::new(MemoryDirectory::default());
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        directory.clone(),
    );

    svc.approve_internship_form(form.id).await.expect("approve");

    let created = directory.created_identities();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].1, "new@acme.test");
    assert_eq!(directory.profiles(), created);

    let stored = placements.form(form.id).unwrap();
    assert_eq!(stored.supervisor_id, Some(created[0].0));
    assert_eq!(stored.temp_email, None);
    assert_eq!(
        placements.enrollment_status(enrollment_id),
        Some(OjtStatus::Active)
    );
}

#[tokio::test]
async fn profile_insert_failure_deletes_the_fresh_identity() {
    let enrollment_id = Uuid::new_v4();
    let form = make_form(enrollment_id, InternshipStatus::Pending, Some("new@acme.test"));

    let placements = Arc::new(MemoryPlacements::with_forms(vec![form.clone()]));
    let directory = Arc::new(MemoryDirectory::default().failing_profile_inserts());
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        directory.clone(),
    );

    let err = svc.approve_internship_form(form.id).await.unwrap_err();
    assert!(matches!(err, ReviewError::Store(StoreError::Unavailable(_))));

    let created = directory.created_identities();
    assert_eq!(created.len(), 1);
    assert_eq!(directory.deleted_identities(), vec![created[0].0]);

    // The form never advanced.
    let stored = placements.form(form.id).unwrap();
    assert_eq!(stored.status, InternshipStatus::Pending);
    assert_eq!(placements.enrollment_status(enrollment_id), None);
}

#[tokio::test]
async fn a_second_approved_form_for_the_enrollment_conflicts() {
    let enrollment_id = Uuid::new_v4();
    let approved = make_form(enrollment_id, InternshipStatus::Approved, None);
    let pending = make_form(enrollment_id, InternshipStatus::Pending, None);

    let placements = Arc::new(MemoryPlacements::with_forms(vec![
        approved.clone(),
        pending.clone(),
    ]));
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        Arc::new(MemoryDirectory::default()),
    );

    let err = svc.approve_internship_form(pending.id).await.unwrap_err();
    assert!(matches!(err, ReviewError::Conflict(_)));
    assert_eq!(
        placements.form(pending.id).unwrap().status,
        InternshipStatus::Pending
    );
}

#[tokio::test]
async fn re_approving_the_same_form_is_not_a_conflict() {
    let enrollment_id = Uuid::new_v4();
    let approved = make_form(enrollment_id, InternshipStatus::Approved, None);

    let placements = Arc::new(MemoryPlacements::with_forms(vec![approved.clone()]));
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        Arc::new(MemoryDirectory::default()),
    );

    let decision = svc
        .approve_internship_form(approved.id)
        .await
        .expect("idempotent approve");
    assert_eq!(decision.status, InternshipStatus::Approved);
}

#[tokio::test]
async fn approval_without_temp_email_keeps_the_linked_supervisor() {
    let enrollment_id = Uuid::new_v4();
    let supervisor_id = Uuid::new_v4();
    let mut form = make_form(enrollment_id, InternshipStatus::Pending, None);
    form.supervisor_id = Some(supervisor_id);

    let placements = Arc::new(MemoryPlacements::with_forms(vec![form.clone()]));
    let directory = Arc::new(MemoryDirectory::default());
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        directory.clone(),
    );

    svc.approve_internship_form(form.id).await.expect("approve");

    let stored = placements.form(form.id).unwrap();
    assert_eq!(stored.supervisor_id, Some(supervisor_id));
    assert!(directory.created_identities().is_empty());
}

#[tokio::test]
async fn rejecting_a_form_stores_feedback_on_the_row() {
    let enrollment_id = Uuid::new_v4();
    let form = make_form(enrollment_id, InternshipStatus::Pending, None);

    let placements = Arc::new(MemoryPlacements::with_forms(vec![form.clone()]));
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        placements.clone(),
        Arc::new(MemoryDirectory::default()),
    );

    svc.reject_internship_form(form.id, Some("Schedule overlaps classes".to_string()))
        .await
        .expect("reject");

    let stored = placements.form(form.id).unwrap();
    assert_eq!(stored.status, InternshipStatus::Rejected);
    assert_eq!(stored.feedback.as_deref(), Some("Schedule overlaps classes"));
}

#[tokio::test]
async fn rejecting_a_missing_form_is_not_found() {
    let svc = service(
        Arc::new(MemoryDocuments::default()),
        Arc::new(MemoryPlacements::default()),
        Arc::new(MemoryDirectory::default()),
    );

    let err = svc
        .reject_internship_form(Uuid::new_v4(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ReviewError::NotFound("internship form")));
}
