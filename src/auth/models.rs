//! Authentication data models

use serde::{Deserialize, Serialize};

/// JWT claims structure
///
/// Lives only inside signed tokens and, for the duration of a request, in
/// the request extensions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expires-at, seconds since the Unix epoch
    pub exp: i64,
}
