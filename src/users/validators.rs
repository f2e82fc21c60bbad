use regex::Regex;
use std::sync::OnceLock;

use super::models::{CreateUserRequest, LoginRequest, UpdateUserRequest};
use crate::common::{ValidationResult, Validator};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_NAME_LENGTH: usize = 100;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern is valid")
    })
}

fn check_email(result: &mut ValidationResult, email: &str) {
    if !email_regex().is_match(email.trim()) {
        result.add_error("email", "must be a valid email address");
    }
}

fn check_name(result: &mut ValidationResult, name: &str) {
    if name.trim().is_empty() {
        result.add_error("name", "must not be empty");
    } else if name.chars().count() > MAX_NAME_LENGTH {
        result.add_error("name", "must not exceed 100 characters");
    }
}

impl Validator<CreateUserRequest> for CreateUserRequest {
    fn validate(&self, data: &CreateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("name", data.name.as_deref());
        result.require("email", data.email.as_deref());
        result.require("password", data.password.as_deref());

        if let Some(name) = data.name.as_deref() {
            if !result.has_error_for("name") {
                check_name(&mut result, name);
            }
        }

        if let Some(email) = data.email.as_deref() {
            if !result.has_error_for("email") {
                check_email(&mut result, email);
            }
        }

        if let Some(password) = data.password.as_deref() {
            let length = password.chars().count();
            if !result.has_error_for("password")
                && !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length)
            {
                result.add_error("password", "must be between 6 and 128 characters");
            }
        }

        result
    }
}

impl Validator<LoginRequest> for LoginRequest {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require("email", data.email.as_deref());
        // Password strength is not re-checked at login.
        if data.password.as_deref().map_or(true, str::is_empty) {
            result.add_error("password", "is required");
        }
        result
    }
}

impl Validator<UpdateUserRequest> for UpdateUserRequest {
    fn validate(&self, data: &UpdateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.is_none() && data.email.is_none() {
            result.add_error("body", "at least one of name or email is required");
        }
        if let Some(name) = data.name.as_deref() {
            check_name(&mut result, name);
        }
        if let Some(email) = data.email.as_deref() {
            check_email(&mut result, email);
        }

        result
    }
}
