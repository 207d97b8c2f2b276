use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::macros::{date, time};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::db::models::{
    Document, DocumentStatus, HistoryEntry, InternshipForm, InternshipStatus, NewHistoryEntry,
    OjtStatus, User, UserRole, UserStatus,
};
use crate::modules::review::service::ReviewService;
use crate::modules::review::store::{
    Directory, DocumentStore, PlacementStore, StoreError,
};

fn base_time() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)
}

pub fn make_document() -> Document {
    Document {
        id: Uuid::new_v4(),
        enrollment_id: Uuid::new_v4(),
        requirement_type_id: Uuid::new_v4(),
        file_path: "documents/e1/resume.pdf".to_string(),
        file_name: "resume.pdf".to_string(),
        file_size: 1024,
        mime_type: "application/pdf".to_string(),
        submitted_at: base_time(),
    }
}

pub fn make_form(
    enrollment_id: Uuid,
    status: InternshipStatus,
    temp_email: Option<&str>,
) -> InternshipForm {
    InternshipForm {
        id: Uuid::new_v4(),
        enrollment_id,
        company_name: "Acme Manufacturing".to_string(),
        company_address: "12 Industry Rd".to_string(),
        start_date: date!(2025 - 06 - 02),
        end_date: date!(2025 - 08 - 29),
        start_time: time!(8:00),
        end_time: time!(17:00),
        days_of_week: vec!["monday".to_string(), "wednesday".to_string()],
        status,
        supervisor_id: None,
        temp_email: temp_email.map(str::to_string),
        feedback: None,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn make_user(email: &str, role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$2b$12$test".to_string(),
        first_name: "Sam".to_string(),
        last_name: "Reyes".to_string(),
        role,
        status: UserStatus::Active,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

/// Document store over hash maps. Appended entries get strictly increasing
/// timestamps so derived-status assertions are deterministic.
#[derive(Default)]
pub struct MemoryDocuments {
    documents: Mutex<HashMap<Uuid, Document>>,
    history: Mutex<Vec<HistoryEntry>>,
    clock: AtomicI64,
}

impl MemoryDocuments {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents.into_iter().map(|d| (d.id, d)).collect()),
            ..Default::default()
        }
    }

    pub fn seed_entry(&self, document_id: Uuid, status: DocumentStatus) -> HistoryEntry {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            document_id,
            document_status: status,
            title: "Document submitted".to_string(),
            description: "Awaiting review.".to_string(),
            created_at: base_time() + Duration::seconds(tick),
        };
        self.history.lock().unwrap().push(entry.clone());
        entry
    }

    pub fn entries_for(&self, document_id: Uuid) -> Vec<HistoryEntry> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.document_id == document_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocuments {
    async fn fetch(&self, document_id: Uuid) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.lock().unwrap().get(&document_id).cloned())
    }

    async fn history(&self, document_id: Uuid) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.entries_for(document_id))
    }

    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, StoreError> {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let stored = HistoryEntry {
            id: Uuid::new_v4(),
            document_id: entry.document_id,
            document_status: entry.document_status,
            title: entry.title,
            description: entry.description,
            created_at: base_time() + Duration::seconds(tick),
        };
        self.history.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

#[derive(Default)]
pub struct MemoryPlacements {
    forms: Mutex<HashMap<Uuid, InternshipForm>>,
    enrollments: Mutex<HashMap<Uuid, OjtStatus>>,
}

impl MemoryPlacements {
    pub fn with_forms(forms: Vec<InternshipForm>) -> Self {
        Self {
            forms: Mutex::new(forms.into_iter().map(|f| (f.id, f)).collect()),
            ..Default::default()
        }
    }

    pub fn form(&self, internship_id: Uuid) -> Option<InternshipForm> {
        self.forms.lock().unwrap().get(&internship_id).cloned()
    }

    pub fn enrollment_status(&self, enrollment_id: Uuid) -> Option<OjtStatus> {
        self.enrollments.lock().unwrap().get(&enrollment_id).copied()
    }
}

#[async_trait]
impl PlacementStore for MemoryPlacements {
    async fn fetch(&self, internship_id: Uuid) -> Result<Option<InternshipForm>, StoreError> {
        Ok(self.form(internship_id))
    }

    async fn approved_form_for_enrollment(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<InternshipForm>, StoreError> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .values()
            .find(|f| f.enrollment_id == enrollment_id && f.status == InternshipStatus::Approved)
            .cloned())
    }

    async fn record_approval(
        &self,
        internship_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let mut forms = self.forms.lock().unwrap();
        let form = forms.get_mut(&internship_id).ok_or(StoreError::NotFound)?;
        form.status = InternshipStatus::Approved;
        form.supervisor_id = supervisor_id;
        form.temp_email = None;
        Ok(())
    }

    async fn record_rejection(
        &self,
        internship_id: Uuid,
        feedback: Option<String>,
    ) -> Result<(), StoreError> {
        let mut forms = self.forms.lock().unwrap();
        let form = forms.get_mut(&internship_id).ok_or(StoreError::NotFound)?;
        form.status = InternshipStatus::Rejected;
        form.feedback = feedback;
        Ok(())
    }

    async fn set_enrollment_status(
        &self,
        enrollment_id: Uuid,
        status: OjtStatus,
    ) -> Result<(), StoreError> {
        self.enrollments.lock().unwrap().insert(enrollment_id, status);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDirectory {
    users: Mutex<HashMap<String, User>>,
    created: Mutex<Vec<(Uuid, String)>>,
    profiles: Mutex<Vec<(Uuid, String)>>,
    deleted: Mutex<Vec<Uuid>>,
    fail_profile_insert: AtomicBool,
}

impl MemoryDirectory {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|u| (u.email.clone(), u)).collect()),
            ..Default::default()
        }
    }

    pub fn failing_profile_inserts(self) -> Self {
        self.fail_profile_insert.store(true, Ordering::SeqCst);
        self
    }

    pub fn created_identities(&self) -> Vec<(Uuid, String)> {
        self.created.lock().unwrap().clone()
    }

    pub fn profiles(&self) -> Vec<(Uuid, String)> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn deleted_identities(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn create_identity(&self, email: &str) -> Result<Uuid, StoreError> {
        let mut user = make_user(email, UserRole::Supervisor);
        user.status = UserStatus::Active;
        let user_id = user.id;
        self.users.lock().unwrap().insert(email.to_string(), user);
        self.created.lock().unwrap().push((user_id, email.to_string()));
        Ok(user_id)
    }

    async fn create_supervisor_profile(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<(), StoreError> {
        if self.fail_profile_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("profile insert failed".to_string()));
        }
        self.profiles.lock().unwrap().push((user_id, email.to_string()));
        Ok(())
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), StoreError> {
        self.deleted.lock().unwrap().push(user_id);
        self.users.lock().unwrap().retain(|_, u| u.id != user_id);
        Ok(())
    }
}

pub fn service(
    documents: Arc<MemoryDocuments>,
    placements: Arc<MemoryPlacements>,
    directory: Arc<MemoryDirectory>,
) -> ReviewService<MemoryDocuments, MemoryPlacements, MemoryDirectory> {
    ReviewService::new(documents, placements, directory)
}
