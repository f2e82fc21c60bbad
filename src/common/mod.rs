// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod extract;
pub mod helpers;
pub mod id_generator;
pub mod migrations;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod test_support;

pub use config::AppConfig;
pub use error::ApiError;
pub use extract::JsonBody;
pub use helpers::{safe_email_log, safe_token_log};
pub use id_generator::{generate_feedback_id, generate_user_id};
pub use state::AppState;
pub use validation::{ValidationResult, Validator};
