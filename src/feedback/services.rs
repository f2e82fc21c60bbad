use super::models::{Feedback, FeedbackFields};
use crate::common::{generate_feedback_id, ApiError};
use sqlx::SqlitePool;
use tracing::info;

const FEEDBACK_COLUMNS: &str =
    "id, title, description, rating, created_by, created_at, updated_at";

pub struct FeedbackService {
    db: SqlitePool,
}

impl FeedbackService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<Feedback>, ApiError> {
        let entries = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {} FROM feedback ORDER BY created_at DESC, id DESC",
            FEEDBACK_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    pub async fn find_by_id(&self, feedback_id: &str) -> Result<Option<Feedback>, ApiError> {
        let entry = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {} FROM feedback WHERE id = ?",
            FEEDBACK_COLUMNS
        ))
        .bind(feedback_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(entry)
    }

    pub async fn create(
        &self,
        fields: FeedbackFields,
        created_by: Option<&str>,
    ) -> Result<Feedback, ApiError> {
        let feedback_id = generate_feedback_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO feedback (id, title, description, rating, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&feedback_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.rating)
        .bind(created_by)
        .bind(&now)
        .execute(&self.db)
        .await?;

        info!(feedback_id = %feedback_id, rating = fields.rating, "Created feedback");

        self.find_by_id(&feedback_id)
            .await?
            .ok_or_else(|| ApiError::InternalServer("created feedback could not be read back".to_string()))
    }

    /// Replaces title, description and rating. `None` if the id is unknown.
    pub async fn update(
        &self,
        feedback_id: &str,
        fields: FeedbackFields,
    ) -> Result<Option<Feedback>, ApiError> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE feedback
            SET title = ?, description = ?, rating = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.rating)
        .bind(&now)
        .bind(feedback_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        info!(feedback_id = %feedback_id, "Updated feedback");
        self.find_by_id(feedback_id).await
    }

    /// Returns false if no entry had this id.
    pub async fn delete(&self, feedback_id: &str) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(feedback_id)
            .execute(&self.db)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(feedback_id = %feedback_id, "Deleted feedback");
        }
        Ok(deleted)
    }
}
