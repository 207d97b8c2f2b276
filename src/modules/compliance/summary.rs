use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{DocumentStatus, RequirementType};

/// One (trainee, requirement-type) pair with the document's derived current
/// status. Trainees with no document for a requirement produce no row.
#[derive(Debug, Clone)]
pub struct RequirementStatusRow {
    pub enrollment_id: Uuid,
    pub requirement_type_id: Uuid,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementComplianceSummary {
    pub requirement_type_id: Uuid,
    pub requirement_name: String,
    pub total_trainees: u64,
    pub submitted_count: u64,
    pub approved_count: u64,
    pub pending_count: u64,
    pub rejected_count: u64,
    pub not_submitted_count: u64,
    pub compliance_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionComplianceSummary {
    pub section_id: Uuid,
    pub total_trainees: u64,
    pub requirements: Vec<RequirementComplianceSummary>,
}

/// Aggregate per-requirement counts for a section.
///
/// Recomputed in full from the source of truth on every call; the report is
/// never cached or incrementally maintained. The percentage is approved-based
/// and defined as 0 (not NaN) for an empty section.
pub fn summarize(
    section_id: Uuid,
    total_trainees: u64,
    requirement_types: &[RequirementType],
    rows: &[RequirementStatusRow],
) -> SectionComplianceSummary {
    let requirements = requirement_types
        .iter()
        .map(|rt| {
            let mut submitted = 0u64;
            let mut approved = 0u64;
            let mut pending = 0u64;
            let mut rejected = 0u64;

            for row in rows.iter().filter(|r| r.requirement_type_id == rt.id) {
                match row.status {
                    DocumentStatus::NotSubmitted => {}
                    status => {
                        submitted += 1;
                        match status {
                            DocumentStatus::Approved => approved += 1,
                            DocumentStatus::Rejected => rejected += 1,
                            DocumentStatus::Pending | DocumentStatus::RevisionRequested => {
                                pending += 1
                            }
                            DocumentStatus::Archived | DocumentStatus::NotSubmitted => {}
                        }
                    }
                }
            }

            let compliance_percentage = if total_trainees == 0 {
                0.0
            } else {
                100.0 * approved as f64 / total_trainees as f64
            };

            RequirementComplianceSummary {
                requirement_type_id: rt.id,
                requirement_name: rt.name.clone(),
                total_trainees,
                submitted_count: submitted,
                approved_count: approved,
                pending_count: pending,
                rejected_count: rejected,
                not_submitted_count: total_trainees.saturating_sub(submitted),
                compliance_percentage,
            }
        })
        .collect();

    SectionComplianceSummary {
        section_id,
        total_trainees,
        requirements,
    }
}
