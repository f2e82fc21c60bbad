//! # Auth Module
//!
//! Credential handling and request authentication:
//! - Argon2id password hashing (`CredentialStore`)
//! - JWT issuance and verification (`TokenService`)
//! - The bearer-token gate for protected routes (`require_auth`)
//! - `AuthedUser` extractor for handlers behind the gate

pub mod extractors;
pub mod middleware;
pub mod models;
pub mod password;
pub mod token;


pub use extractors::AuthedUser;
pub use middleware::require_auth;
pub use models::Claims;
pub use password::{CredentialError, CredentialStore, HashCost};
pub use token::{TokenRejection, TokenService};
