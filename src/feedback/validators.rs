use super::models::{FeedbackFields, FeedbackRequest};
use crate::common::{ApiError, ValidationResult, Validator};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const MAX_TITLE_LENGTH: usize = 200;

impl Validator<FeedbackRequest> for FeedbackRequest {
    fn validate(&self, data: &FeedbackRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("title", data.title.as_deref());
        result.require("description", data.description.as_deref());

        if let Some(title) = data.title.as_deref() {
            if title.chars().count() > MAX_TITLE_LENGTH {
                result.add_error("title", "must not exceed 200 characters");
            }
        }

        match data.rating {
            None => result.add_error("rating", "is required"),
            Some(rating) if !(MIN_RATING..=MAX_RATING).contains(&rating) => {
                result.add_error("rating", "must be between 1 and 5")
            }
            Some(_) => {}
        }

        result
    }
}

impl FeedbackRequest {
    /// Validates and trims the request into storable fields.
    pub fn into_fields(self) -> Result<FeedbackFields, ApiError> {
        self.validate(&self).into_result()?;

        match (self.title, self.description, self.rating) {
            (Some(title), Some(description), Some(rating)) => Ok(FeedbackFields {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                rating,
            }),
            _ => Err(ApiError::ValidationError("Missing required fields".to_string())),
        }
    }
}
