//! # Feedback Module
//!
//! CRUD for feedback entries (title, description, 1-5 rating).

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::feedback_routes;
