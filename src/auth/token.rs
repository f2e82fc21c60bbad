//! JWT issuance and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use super::models::Claims;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Why a bearer token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("Token is missing")]
    Missing,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,
}

impl TokenRejection {
    /// Machine-readable code used in error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            TokenRejection::Missing => "TOKEN_MISSING",
            TokenRejection::Malformed => "TOKEN_MALFORMED",
            TokenRejection::InvalidSignature => "TOKEN_INVALID_SIGNATURE",
            TokenRejection::Expired => "TOKEN_EXPIRED",
        }
    }
}

/// Signs and checks HS256 tokens with one process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `subject` valid from now until now + ttl.
    pub fn issue(&self, subject: &str, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(subject, email, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now` (Unix seconds).
    pub fn issue_at(
        &self,
        subject: &str,
        email: &str,
        now: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies `token` against the clock value `now` (Unix seconds).
    ///
    /// Checks run in order: structure, signature, expiry. A token is valid
    /// up to and including its `exp` second.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenRejection> {
        // Structure pass: three segments, decodable header, payload that
        // deserializes into `Claims`. The signature is not looked at yet.
        let mut structure = Validation::new(ALGORITHM);
        structure.insecure_disable_signature_validation();
        structure.validate_exp = false;
        decode::<Claims>(token, &self.decoding_key, &structure)
            .map_err(|_| TokenRejection::Malformed)?;

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked below against `now` so it can be driven by tests.
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenRejection::InvalidSignature
                }
                _ => TokenRejection::Malformed,
            })?
            .claims;

        if now > claims.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }
}
