use super::models::{NewUser, User, UserChanges};
use crate::common::{generate_user_id, safe_email_log, ApiError};
use sqlx::SqlitePool;
use tracing::info;

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// Persistence for user accounts.
///
/// Accounts are looked up by id or email only; never by password hash.
pub struct UsersService {
    db: SqlitePool,
}

/// Turns a UNIQUE violation on `users.email` into `ApiError::Conflict`.
/// Any other constraint failure stays a database error.
pub(super) fn map_email_conflict(e: sqlx::Error) -> ApiError {
    match &e {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() && db_err.message().contains("users.email") =>
        {
            ApiError::Conflict("Email is already registered".to_string())
        }
        _ => ApiError::DatabaseError(e),
    }
}

impl UsersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = ?",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    /// Inserts exactly one account and returns its id.
    ///
    /// A concurrent registration for the same email loses on the UNIQUE
    /// constraint and gets `ApiError::Conflict`.
    pub async fn insert(&self, new_user: NewUser) -> Result<String, ApiError> {
        let user_id = generate_user_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user_id)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(map_email_conflict)?;

        info!(
            user_id = %user_id,
            email = %safe_email_log(&new_user.email),
            "Created user"
        );

        Ok(user_id)
    }

    /// Applies `changes` and returns the updated row, or `None` if the id is unknown.
    pub async fn update(&self, user_id: &str, changes: UserChanges) -> Result<Option<User>, ApiError> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE(?, name),
                email = COALESCE(?, email),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&now)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(map_email_conflict)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(user_id = %user_id, "Updated user");
        self.find_by_id(user_id).await
    }

    /// Returns false if no account had this id.
    pub async fn delete(&self, user_id: &str) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(user_id = %user_id, "Deleted user");
        }
        Ok(deleted)
    }
}
