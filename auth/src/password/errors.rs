use thiserror::Error;

/// Error type for password operations.
///
/// Verification has no error variant: a digest that cannot be parsed is
/// reported as a mismatch, so callers cannot distinguish a malformed stored
/// hash from a wrong password.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
