use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feedback {
    pub id: String,
    pub title: String,
    pub description: String,
    pub rating: i64, // 1..=5
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Body for both create and full update; every field is required.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
}

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct FeedbackFields {
    pub title: String,
    pub description: String,
    pub rating: i64,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub feedback: Feedback,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
