use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::models::{
    Document, DocumentStatus, Enrollment, HistoryEntry, InternshipForm, NewEnrollment,
    NewRequirementType, NewSection, OjtStatus, RequirementType, Section,
};
use crate::db::DatabaseError;
use crate::modules::compliance::service::ComplianceSource;
use crate::modules::compliance::summary::RequirementStatusRow;
use crate::modules::review::store::StoreError;
use crate::modules::submissions::service::SubmissionReadStore;
use crate::modules::submissions::view::{EnrolledTrainee, SectionSubmissions};

const SELECT_REQUIREMENT_TYPE: &str = r#"
    SELECT id, name, description, template_path, created_at
    FROM requirement_types
"#;

#[derive(Clone)]
pub struct SectionRepository {
    pool: PgPool,
}

impl SectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_section(&self, new_section: &NewSection) -> Result<Section, DatabaseError> {
        let section = sqlx::query_as::<Postgres, Section>(
            r#"
            INSERT INTO sections (name, school_year, coordinator_user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, school_year, coordinator_user_id, created_at, updated_at
            "#,
        )
        .bind(&new_section.name)
        .bind(&new_section.school_year)
        .bind(new_section.coordinator_user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(section)
    }

    pub async fn list_sections(&self) -> Result<Vec<Section>, DatabaseError> {
        let sections = sqlx::query_as::<Postgres, Section>(
            r#"
            SELECT id, name, school_year, coordinator_user_id, created_at, updated_at
            FROM sections
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(sections)
    }

    pub async fn create_enrollment(
        &self,
        new_enrollment: &NewEnrollment,
    ) -> Result<Enrollment, DatabaseError> {
        let enrollment = sqlx::query_as::<Postgres, Enrollment>(
            r#"
            INSERT INTO enrollments (section_id, trainee_user_id, ojt_status, required_hours)
            VALUES ($1, $2, $3, $4)
            RETURNING id, section_id, trainee_user_id, ojt_status, required_hours, created_at, updated_at
            "#,
        )
        .bind(new_enrollment.section_id)
        .bind(new_enrollment.trainee_user_id)
        .bind(OjtStatus::NotStarted)
        .bind(new_enrollment.required_hours)
        .fetch_one(&self.pool)
        .await?;
        Ok(enrollment)
    }

    pub async fn create_requirement_type(
        &self,
        new_type: &NewRequirementType,
    ) -> Result<RequirementType, DatabaseError> {
        let requirement_type = sqlx::query_as::<Postgres, RequirementType>(
            r#"
            INSERT INTO requirement_types (name, description, template_path)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, template_path, created_at
            "#,
        )
        .bind(&new_type.name)
        .bind(&new_type.description)
        .bind(&new_type.template_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(requirement_type)
    }

    pub async fn list_requirement_types(&self) -> Result<Vec<RequirementType>, DatabaseError> {
        let types = sqlx::query_as::<Postgres, RequirementType>(&format!(
            "{SELECT_REQUIREMENT_TYPE} ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(types)
    }

    async fn exists(&self, section_id: Uuid) -> Result<bool, StoreError> {
        let row: (bool,) =
            sqlx::query_as::<Postgres, (bool,)>("SELECT EXISTS(SELECT 1 FROM sections WHERE id = $1)")
                .bind(section_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(row.0)
    }
}

#[async_trait]
impl ComplianceSource for SectionRepository {
    async fn section_exists(&self, section_id: Uuid) -> Result<bool, StoreError> {
        self.exists(section_id).await
    }

    async fn trainee_count(&self, section_id: Uuid) -> Result<u64, StoreError> {
        let row: (i64,) =
            sqlx::query_as::<Postgres, (i64,)>("SELECT COUNT(*) FROM enrollments WHERE section_id = $1")
                .bind(section_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(row.0 as u64)
    }

    async fn requirement_types(&self) -> Result<Vec<RequirementType>, StoreError> {
        Ok(self.list_requirement_types().await?)
    }

    async fn current_statuses(
        &self,
        section_id: Uuid,
    ) -> Result<Vec<RequirementStatusRow>, StoreError> {
        // One row per (trainee, requirement) slot: the latest document for
        // the slot, with the status of its latest history entry.
        let rows: Vec<(Uuid, Uuid, DocumentStatus)> =
            sqlx::query_as::<Postgres, (Uuid, Uuid, DocumentStatus)>(
                r#"
                SELECT DISTINCT ON (d.enrollment_id, d.requirement_type_id)
                       d.enrollment_id, d.requirement_type_id, h.document_status
                FROM documents d
                JOIN enrollments e ON e.id = d.enrollment_id
                JOIN LATERAL (
                    SELECT document_status
                    FROM document_history
                    WHERE document_id = d.id
                    ORDER BY created_at DESC
                    LIMIT 1
                ) h ON TRUE
                WHERE e.section_id = $1
                ORDER BY d.enrollment_id, d.requirement_type_id, d.submitted_at DESC
                "#,
            )
            .bind(section_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(enrollment_id, requirement_type_id, status)| RequirementStatusRow {
                enrollment_id,
                requirement_type_id,
                status,
            })
            .collect())
    }
}

#[async_trait]
impl SubmissionReadStore for SectionRepository {
    async fn load_section(
        &self,
        section_id: Uuid,
    ) -> Result<Option<SectionSubmissions>, StoreError> {
        if !self.exists(section_id).await? {
            return Ok(None);
        }

        let trainees = sqlx::query_as::<Postgres, EnrolledTrainee>(
            r#"
            SELECT e.id AS enrollment_id, e.trainee_user_id, u.first_name, u.last_name,
                   u.email, e.ojt_status
            FROM enrollments e
            JOIN users u ON u.id = e.trainee_user_id
            WHERE e.section_id = $1
            ORDER BY u.last_name, u.first_name
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let requirement_types = self.list_requirement_types().await?;

        let documents = sqlx::query_as::<Postgres, Document>(
            r#"
            SELECT d.id, d.enrollment_id, d.requirement_type_id, d.file_path, d.file_name,
                   d.file_size, d.mime_type, d.submitted_at
            FROM documents d
            JOIN enrollments e ON e.id = d.enrollment_id
            WHERE e.section_id = $1
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let history = sqlx::query_as::<Postgres, HistoryEntry>(
            r#"
            SELECT h.id, h.document_id, h.document_status, h.title, h.description, h.created_at
            FROM document_history h
            JOIN documents d ON d.id = h.document_id
            JOIN enrollments e ON e.id = d.enrollment_id
            WHERE e.section_id = $1
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let forms = sqlx::query_as::<Postgres, InternshipForm>(
            r#"
            SELECT f.id, f.enrollment_id, f.company_name, f.company_address, f.start_date,
                   f.end_date, f.start_time, f.end_time, f.days_of_week, f.status,
                   f.supervisor_id, f.temp_email, f.feedback, f.created_at, f.updated_at
            FROM internship_forms f
            JOIN enrollments e ON e.id = f.enrollment_id
            WHERE e.section_id = $1
            "#,
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Some(SectionSubmissions {
            trainees,
            requirement_types,
            documents,
            history,
            forms,
        }))
    }
}
