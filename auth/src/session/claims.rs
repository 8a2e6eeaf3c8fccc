use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// Deliberately fixed-shape: subject, issued-at, and expiry. Services that
/// need richer tokens define their own claims type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a subject with automatic expiration.
    ///
    /// # Arguments
    /// * `subject` - Unique account identifier
    /// * `ttl_hours` - Hours until the session expires
    pub fn for_subject(subject: impl ToString, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the session is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
