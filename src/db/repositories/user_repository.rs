use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use secrecy::ExposeSecret;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::db::models::{NewUser, User, UserRole, UserStatus};
use crate::db::DatabaseError;
use crate::modules::review::store::{Directory, StoreError};

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, first_name, last_name, role, status, created_at, updated_at
    FROM users
"#;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        new_user: &NewUser,
        password_hash: String,
    ) -> Result<User, DatabaseError> {
        let user: User = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, role, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, first_name, last_name, role, status, created_at, updated_at
            "#,
        )
        .bind(new_user.email.to_lowercase())
        .bind(password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(new_user.role)
        .bind(UserStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(user)
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<Postgres, User>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<Postgres, User>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<Postgres, User>(&format!("{SELECT_USER} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}

fn map_insert_error(err: sqlx::Error) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DatabaseError::Duplicate,
        _ => DatabaseError::Sqlx(err),
    }
}

fn random_credential() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[async_trait]
impl Directory for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.get_by_email(email).await?)
    }

    async fn create_identity(&self, email: &str) -> Result<Uuid, StoreError> {
        let password_hash = bcrypt::hash(random_credential(), bcrypt::DEFAULT_COST)
            .map_err(|e| StoreError::Unavailable(format!("credential hashing failed: {e}")))?;

        // Pre-confirmed: the account is active immediately, the supervisor
        // resets the credential through the usual recovery path.
        let row: (Uuid,) = sqlx::query_as::<Postgres, (Uuid,)>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, role, status)
            VALUES ($1, $2, '', '', $3, $4)
            RETURNING id
            "#,
        )
        .bind(email.to_lowercase())
        .bind(password_hash)
        .bind(UserRole::Supervisor)
        .bind(UserStatus::Active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(row.0)
    }

    async fn create_supervisor_profile(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO supervisor_profiles (user_id, contact_email)
            VALUES ($1, $2)
            "#,
        )
        .bind(user_id)
        .bind(email.to_lowercase())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
