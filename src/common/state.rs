// Application state shared across all modules

use sqlx::SqlitePool;

use crate::auth::{CredentialStore, TokenService};

/// Read-only state constructed once in `main` and shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub credentials: CredentialStore,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(db: SqlitePool, credentials: CredentialStore, tokens: TokenService) -> Self {
        Self {
            db,
            credentials,
            tokens,
        }
    }
}
