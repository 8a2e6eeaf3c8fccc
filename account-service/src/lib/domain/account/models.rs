use std::fmt;

use serde::Deserialize;

/// Inbound registration payload.
///
/// Unknown JSON fields are rejected at decode time. The payload lives for
/// one request only; the service overwrites `password` with its hash before
/// the payload crosses the storage boundary, so the plaintext is never
/// persisted or logged.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Inbound login payload.
///
/// Either identifier may be omitted, but at least one must be non-empty;
/// the validator enforces that after the per-field rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public projection of a stored account.
///
/// Never carries the password hash; this is what registration returns to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}

/// Stored credential consumed by the login path.
#[derive(Debug, Clone)]
pub struct Credential {
    pub account_id: AccountId,
    pub password_hash: String,
}
