use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
