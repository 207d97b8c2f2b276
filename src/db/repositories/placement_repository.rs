use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::models::{InternshipForm, InternshipStatus, NewInternshipForm, OjtStatus};
use crate::db::DatabaseError;
use crate::modules::review::store::{PlacementStore, StoreError};

const SELECT_FORM: &str = r#"
    SELECT id, enrollment_id, company_name, company_address, start_date, end_date,
           start_time, end_time, days_of_week, status, supervisor_id, temp_email,
           feedback, created_at, updated_at
    FROM internship_forms
"#;

#[derive(Clone)]
pub struct PlacementRepository {
    pool: PgPool,
}

impl PlacementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(
        &self,
        internship_id: Uuid,
    ) -> Result<Option<InternshipForm>, DatabaseError> {
        let form =
            sqlx::query_as::<Postgres, InternshipForm>(&format!("{SELECT_FORM} WHERE id = $1"))
                .bind(internship_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(form)
    }

    pub async fn create(
        &self,
        new_form: &NewInternshipForm,
    ) -> Result<InternshipForm, DatabaseError> {
        let form = sqlx::query_as::<Postgres, InternshipForm>(
            r#"
            INSERT INTO internship_forms
                (enrollment_id, company_name, company_address, start_date, end_date,
                 start_time, end_time, days_of_week, status, temp_email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, enrollment_id, company_name, company_address, start_date, end_date,
                      start_time, end_time, days_of_week, status, supervisor_id, temp_email,
                      feedback, created_at, updated_at
            "#,
        )
        .bind(new_form.enrollment_id)
        .bind(&new_form.company_name)
        .bind(&new_form.company_address)
        .bind(new_form.start_date)
        .bind(new_form.end_date)
        .bind(new_form.start_time)
        .bind(new_form.end_time)
        .bind(&new_form.days_of_week)
        .bind(InternshipStatus::NotSubmitted)
        .bind(&new_form.temp_email)
        .fetch_one(&self.pool)
        .await?;
        Ok(form)
    }

    /// Move a draft (or rejected) form into the review queue.
    pub async fn submit(&self, internship_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE internship_forms
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status IN ($3, $4)
            "#,
        )
        .bind(internship_id)
        .bind(InternshipStatus::Pending)
        .bind(InternshipStatus::NotSubmitted)
        .bind(InternshipStatus::Rejected)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PlacementStore for PlacementRepository {
    async fn fetch(&self, internship_id: Uuid) -> Result<Option<InternshipForm>, StoreError> {
        Ok(self.get_by_id(internship_id).await?)
    }

    async fn approved_form_for_enrollment(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<InternshipForm>, StoreError> {
        let form = sqlx::query_as::<Postgres, InternshipForm>(&format!(
            "{SELECT_FORM} WHERE enrollment_id = $1 AND status = $2 ORDER BY updated_at DESC LIMIT 1"
        ))
        .bind(enrollment_id)
        .bind(InternshipStatus::Approved)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(form)
    }

    async fn record_approval(
        &self,
        internship_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE internship_forms
            SET status = $2, supervisor_id = $3, temp_email = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(internship_id)
        .bind(InternshipStatus::Approved)
        .bind(supervisor_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn record_rejection(
        &self,
        internship_id: Uuid,
        feedback: Option<String>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE internship_forms
            SET status = $2, feedback = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(internship_id)
        .bind(InternshipStatus::Rejected)
        .bind(feedback)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn set_enrollment_status(
        &self,
        enrollment_id: Uuid,
        status: OjtStatus,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments
            SET ojt_status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(enrollment_id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
