use super::models::{FeedbackRequest, FeedbackResponse, MessageResponse};
use super::services::FeedbackService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState, JsonBody};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

fn not_found() -> ApiError {
    ApiError::NotFound("Feedback not found".to_string())
}

/// GET /api/feedback - List all feedback
pub async fn list_feedback(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = FeedbackService::new(state.db.clone()).list().await?;
    Ok(Json(entries))
}

/// GET /api/feedback/:id - Get one entry
pub async fn get_feedback(
    Extension(state): Extension<Arc<AppState>>,
    Path(feedback_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = FeedbackService::new(state.db.clone())
        .find_by_id(&feedback_id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(entry))
}

/// POST /api/feedback - Create an entry attributed to the caller
pub async fn create_feedback(
    Extension(state): Extension<Arc<AppState>>,
    user: AuthedUser,
    JsonBody(request): JsonBody<FeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = request.into_fields()?;

    let feedback = FeedbackService::new(state.db.clone())
        .create(fields, Some(&user.id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            message: "Feedback created successfully!".to_string(),
            feedback,
        }),
    ))
}

/// PUT /api/feedback/:id - Replace an entry
pub async fn update_feedback(
    Extension(state): Extension<Arc<AppState>>,
    _user: AuthedUser,
    Path(feedback_id): Path<String>,
    JsonBody(request): JsonBody<FeedbackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let fields = request.into_fields()?;

    let feedback = FeedbackService::new(state.db.clone())
        .update(&feedback_id, fields)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(FeedbackResponse {
        message: "Feedback updated successfully!".to_string(),
        feedback,
    }))
}

/// DELETE /api/feedback/:id - Remove an entry
pub async fn delete_feedback(
    Extension(state): Extension<Arc<AppState>>,
    _user: AuthedUser,
    Path(feedback_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if !FeedbackService::new(state.db.clone())
        .delete(&feedback_id)
        .await?
    {
        return Err(not_found());
    }

    Ok(Json(MessageResponse {
        message: "Feedback deleted successfully!".to_string(),
    }))
}
