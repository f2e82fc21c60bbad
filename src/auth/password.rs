//! Password hashing and verification
//!
//! Passwords are stored as Argon2id PHC strings
//! (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`). The salt and cost
//! parameters travel inside the string, so verification never needs the
//! configuration that produced it.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;
use thiserror::Error;

/// Plaintext used to build the decoy hash for unknown-account logins.
const DUMMY_PASSWORD: &str = "feedback-api-decoy-password";

#[derive(Debug, Error)]
pub enum CredentialError {
    /// The stored value is not a parseable password hash. This points at
    /// corrupted data, never at a wrong password.
    #[error("stored password hash is malformed: {0}")]
    MalformedStoredSecret(String),

    #[error("invalid password hashing parameters: {0}")]
    InvalidParams(String),

    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("password hashing worker failed: {0}")]
    WorkerFailed(String),
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Argon2 work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Derives and verifies stored password hashes.
///
/// Cloning is cheap; the decoy hash is shared.
#[derive(Clone)]
pub struct CredentialStore {
    argon2: Argon2<'static>,
    dummy_hash: Arc<str>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl CredentialStore {
    /// Builds a store with the given work factor. Computes one hash up front
    /// for the decoy used by `verify_dummy`.
    pub fn new(cost: HashCost) -> CredentialResult<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| CredentialError::InvalidParams(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let dummy_hash = hash_with(&argon2, DUMMY_PASSWORD)?;

        Ok(Self {
            argon2,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Hashes `plaintext` with a fresh random salt.
    pub fn derive(&self, plaintext: &str) -> CredentialResult<String> {
        hash_with(&self.argon2, plaintext)
    }

    /// Checks `plaintext` against a stored hash.
    ///
    /// Returns `Ok(false)` on a mismatch. Only a structurally broken
    /// `stored` value produces an error.
    pub fn verify(&self, plaintext: &str, stored: &str) -> CredentialResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| CredentialError::MalformedStoredSecret(e.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(CredentialError::MalformedStoredSecret(e.to_string())),
        }
    }

    /// Runs a full verification against the decoy hash and always reports a
    /// mismatch.
    pub fn verify_dummy(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, &self.dummy_hash);
        false
    }

    /// `derive` on the blocking pool.
    pub async fn hash_password(&self, plaintext: &str) -> CredentialResult<String> {
        let store = self.clone();
        let plaintext = plaintext.to_string();

        tokio::task::spawn_blocking(move || store.derive(&plaintext))
            .await
            .map_err(|e| CredentialError::WorkerFailed(e.to_string()))?
    }

    /// `verify` on the blocking pool.
    pub async fn verify_password(&self, plaintext: &str, stored: &str) -> CredentialResult<bool> {
        let store = self.clone();
        let plaintext = plaintext.to_string();
        let stored = stored.to_string();

        tokio::task::spawn_blocking(move || store.verify(&plaintext, &stored))
            .await
            .map_err(|e| CredentialError::WorkerFailed(e.to_string()))?
    }

    /// `verify_dummy` on the blocking pool.
    pub async fn verify_dummy_password(&self, plaintext: &str) -> CredentialResult<bool> {
        let store = self.clone();
        let plaintext = plaintext.to_string();

        tokio::task::spawn_blocking(move || store.verify_dummy(&plaintext))
            .await
            .map_err(|e| CredentialError::WorkerFailed(e.to_string()))
    }
}

fn hash_with(argon2: &Argon2<'_>, plaintext: &str) -> CredentialResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::HashingFailed(e.to_string()))
}
