use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::models::{Company, NewCompany, UpdateCompany};
use crate::db::DatabaseError;

const SELECT_COMPANY: &str = r#"
    SELECT id, name, address, contact_person, contact_email, moa_file_path, created_at, updated_at
    FROM companies
"#;

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_company: &NewCompany) -> Result<Company, DatabaseError> {
        let company = sqlx::query_as::<Postgres, Company>(
            r#"
            INSERT INTO companies (name, address, contact_person, contact_email, moa_file_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, address, contact_person, contact_email, moa_file_path, created_at, updated_at
            "#,
        )
        .bind(&new_company.name)
        .bind(&new_company.address)
        .bind(&new_company.contact_person)
        .bind(&new_company.contact_email)
        .bind(&new_company.moa_file_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn get_by_id(&self, company_id: Uuid) -> Result<Option<Company>, DatabaseError> {
        let company =
            sqlx::query_as::<Postgres, Company>(&format!("{SELECT_COMPANY} WHERE id = $1"))
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(company)
    }

    pub async fn list(&self) -> Result<Vec<Company>, DatabaseError> {
        let companies =
            sqlx::query_as::<Postgres, Company>(&format!("{SELECT_COMPANY} ORDER BY name"))
                .fetch_all(&self.pool)
                .await?;
        Ok(companies)
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        update: &UpdateCompany,
    ) -> Result<Company, DatabaseError> {
        let company = sqlx::query_as::<Postgres, Company>(
            r#"
            UPDATE companies
            SET
                name = COALESCE($1, name),
                address = COALESCE($2, address),
                contact_person = COALESCE($3, contact_person),
                contact_email = COALESCE($4, contact_email),
                moa_file_path = COALESCE($5, moa_file_path),
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, address, contact_person, contact_email, moa_file_path, created_at, updated_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.address)
        .bind(&update.contact_person)
        .bind(&update.contact_email)
        .bind(&update.moa_file_path)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)?;
        Ok(company)
    }

    pub async fn delete(&self, company_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}
