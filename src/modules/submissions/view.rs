use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{
    current_status, latest_entry, Document, DocumentStatus, HistoryEntry, InternshipForm,
    InternshipStatus, OjtStatus, RequirementType,
};

/// One trainee's enrollment joined with their account fields.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrolledTrainee {
    pub enrollment_id: Uuid,
    pub trainee_user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ojt_status: OjtStatus,
}

/// Everything the section requirements listing needs, loaded in one pass.
#[derive(Debug, Clone, Default)]
pub struct SectionSubmissions {
    pub trainees: Vec<EnrolledTrainee>,
    pub requirement_types: Vec<RequirementType>,
    pub documents: Vec<Document>,
    pub history: Vec<HistoryEntry>,
    pub forms: Vec<InternshipForm>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementSlot {
    pub requirement_type_id: Uuid,
    pub requirement_name: String,
    pub document: Option<Document>,
    pub current_status: DocumentStatus,
    /// Description of the latest history entry, when a document exists.
    pub latest_note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraineeRequirements {
    pub enrollment_id: Uuid,
    pub trainee_user_id: Uuid,
    pub trainee_name: String,
    pub email: String,
    pub ojt_status: OjtStatus,
    pub requirements: Vec<RequirementSlot>,
    pub internship_form: Option<InternshipForm>,
}

/// Pick the placement to show for an enrollment: the latest approved form,
/// else the latest pending one, else none.
pub fn select_active_form(forms: &[InternshipForm]) -> Option<&InternshipForm> {
    let latest_with = |status: InternshipStatus| {
        forms
            .iter()
            .filter(|f| f.status == status)
            .max_by_key(|f| f.updated_at)
    };
    latest_with(InternshipStatus::Approved).or_else(|| latest_with(InternshipStatus::Pending))
}

/// Assemble the per-trainee requirement listing for a section.
pub fn assemble(section: &SectionSubmissions) -> Vec<TraineeRequirements> {
    section
        .trainees
        .iter()
        .map(|trainee| {
            let requirements = section
                .requirement_types
                .iter()
                .map(|rt| {
                    // Latest upload wins when a slot was re-submitted.
                    let document = section
                        .documents
                        .iter()
                        .filter(|d| {
                            d.enrollment_id == trainee.enrollment_id
                                && d.requirement_type_id == rt.id
                        })
                        .max_by_key(|d| d.submitted_at);

                    let (status, note) = match document {
                        Some(doc) => {
                            let entries: Vec<HistoryEntry> = section
                                .history
                                .iter()
                                .filter(|h| h.document_id == doc.id)
                                .cloned()
                                .collect();
                            (
                                current_status(&entries),
                                latest_entry(&entries).map(|e| e.description.clone()),
                            )
                        }
                        None => (DocumentStatus::NotSubmitted, None),
                    };

                    RequirementSlot {
                        requirement_type_id: rt.id,
                        requirement_name: rt.name.clone(),
                        document: document.cloned(),
                        current_status: status,
                        latest_note: note,
                    }
                })
                .collect();

            let enrollment_forms: Vec<InternshipForm> = section
                .forms
                .iter()
                .filter(|f| f.enrollment_id == trainee.enrollment_id)
                .cloned()
                .collect();

            TraineeRequirements {
                enrollment_id: trainee.enrollment_id,
                trainee_user_id: trainee.trainee_user_id,
                trainee_name: format!("{} {}", trainee.first_name, trainee.last_name),
                email: trainee.email.clone(),
                ojt_status: trainee.ojt_status,
                requirements,
                internship_form: select_active_form(&enrollment_forms).cloned(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, OffsetDateTime};

    fn base() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn form(
        enrollment_id: Uuid,
        status: InternshipStatus,
        updated_offset_secs: i64,
    ) -> InternshipForm {
        InternshipForm {
            id: Uuid::new_v4(),
            enrollment_id,
            company_name: "Acme Corp".to_string(),
            company_address: "123 Main St".to_string(),
            start_date: time::macros::date!(2026 - 01 - 05),
            end_date: time::macros::date!(2026 - 05 - 29),
            start_time: time::macros::time!(08:00),
            end_time: time::macros::time!(17:00),
            days_of_week: vec!["mon".to_string(), "wed".to_string(), "fri".to_string()],
            status,
            supervisor_id: None,
            temp_email: None,
            feedback: None,
            created_at: base(),
            updated_at: base() + Duration::seconds(updated_offset_secs),
        }
    }

    #[test]
    fn approved_form_preferred_over_newer_pending() {
        let enrollment_id = Uuid::new_v4();
        let approved = form(enrollment_id, InternshipStatus::Approved, 0);
        let pending = form(enrollment_id, InternshipStatus::Pending, 600);
        let forms = vec![pending, approved.clone()];

        let selected = select_active_form(&forms).expect("a form is selected");
        assert_eq!(selected.id, approved.id);
    }

    #[test]
    fn latest_pending_selected_when_nothing_approved() {
        let enrollment_id = Uuid::new_v4();
        let older = form(enrollment_id, InternshipStatus::Pending, 0);
        let newer = form(enrollment_id, InternshipStatus::Pending, 60);
        let newer_id = newer.id;
        let forms = vec![older, newer];

        assert_eq!(select_active_form(&forms).map(|f| f.id), Some(newer_id));
    }

    #[test]
    fn rejected_and_unsubmitted_forms_are_never_selected() {
        let enrollment_id = Uuid::new_v4();
        let forms = vec![
            form(enrollment_id, InternshipStatus::Rejected, 0),
            form(enrollment_id, InternshipStatus::NotSubmitted, 60),
        ];
        assert!(select_active_form(&forms).is_none());
    }

    #[test]
    fn missing_document_renders_not_submitted_slot() {
        let trainee = EnrolledTrainee {
            enrollment_id: Uuid::new_v4(),
            trainee_user_id: Uuid::new_v4(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            email: "ana@example.edu".to_string(),
            ojt_status: OjtStatus::NotStarted,
        };
        let resume = RequirementType {
            id: Uuid::new_v4(),
            name: "Resume".to_string(),
            description: None,
            template_path: None,
            created_at: base(),
        };
        let section = SectionSubmissions {
            trainees: vec![trainee],
            requirement_types: vec![resume],
            ..Default::default()
        };

        let listing = assemble(&section);
        assert_eq!(listing.len(), 1);
        let slot = &listing[0].requirements[0];
        assert_eq!(slot.current_status, DocumentStatus::NotSubmitted);
        assert!(slot.document.is_none());
        assert!(slot.latest_note.is_none());
        assert!(listing[0].internship_form.is_none());
    }

    #[test]
    fn slot_status_follows_latest_history_entry() {
        let enrollment_id = Uuid::new_v4();
        let trainee = EnrolledTrainee {
            enrollment_id,
            trainee_user_id: Uuid::new_v4(),
            first_name: "Ben".to_string(),
            last_name: "Cruz".to_string(),
            email: "ben@example.edu".to_string(),
            ojt_status: OjtStatus::Active,
        };
        let resume = RequirementType {
            id: Uuid::new_v4(),
            name: "Resume".to_string(),
            description: None,
            template_path: None,
            created_at: base(),
        };
        let document = Document {
            id: Uuid::new_v4(),
            enrollment_id,
            requirement_type_id: resume.id,
            file_path: "documents/x/resume.pdf".to_string(),
            file_name: "resume.pdf".to_string(),
            file_size: 1024,
            mime_type: "application/pdf".to_string(),
            submitted_at: base(),
        };
        let history = vec![
            HistoryEntry {
                id: Uuid::new_v4(),
                document_id: document.id,
                document_status: DocumentStatus::Pending,
                title: "Document submitted".to_string(),
                description: "Awaiting review.".to_string(),
                created_at: base(),
            },
            HistoryEntry {
                id: Uuid::new_v4(),
                document_id: document.id,
                document_status: DocumentStatus::Rejected,
                title: "Document rejected".to_string(),
                description: "Wrong file format".to_string(),
                created_at: base() + Duration::seconds(30),
            },
        ];

        let section = SectionSubmissions {
            trainees: vec![trainee],
            requirement_types: vec![resume],
            documents: vec![document],
            history,
            forms: Vec::new(),
        };

        let listing = assemble(&section);
        let slot = &listing[0].requirements[0];
        assert_eq!(slot.current_status, DocumentStatus::Rejected);
        assert_eq!(slot.latest_note.as_deref(), Some("Wrong file format"));
    }
}
