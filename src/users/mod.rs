//! # Users Module
//!
//! Account registration, login and account CRUD. Passwords are hashed by
//! `auth::CredentialStore`; login issues tokens through `auth::TokenService`.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::users_routes;
