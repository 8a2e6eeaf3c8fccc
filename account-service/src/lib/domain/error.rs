use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;
use serde::Serialize;

/// Per-field violation descriptions attached to an error.
///
/// BTreeMap so serialized bodies list fields in a stable order.
pub type FieldViolations = BTreeMap<String, String>;

/// Closed set of domain error kinds. Every failure path terminates in
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
    ServiceUnavailable,
    Timeout,
}

impl ErrorKind {
    /// Wire code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::Unauthenticated => "UNAUTHENTICATED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal => "INTERNAL",
            ErrorKind::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorKind::Timeout => "TIMEOUT",
        }
    }

    /// Transport status for this kind.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured, client-safe domain error.
///
/// Carries a kind from the closed taxonomy, a message safe for client
/// display, optional per-field violations, and an optional wrapped cause
/// kept for server-side diagnostics only. The cause is never serialized.
#[derive(Debug, Serialize)]
pub struct DomainError {
    code: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldViolations>,
    #[serde(skip)]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl DomainError {
    /// Construct an error with no cause.
    pub fn new(
        code: ErrorKind,
        message: impl Into<String>,
        fields: Option<FieldViolations>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            fields,
            source: None,
        }
    }

    /// Wrap a cause in a new error.
    ///
    /// If the cause is itself a `DomainError`, the original kind is
    /// preserved (the outer kind is advisory only) and the messages are
    /// concatenated as `"<new>: <original>"`, so a re-wrap never silently
    /// changes the client-visible status. An opaque cause takes the new
    /// kind verbatim.
    pub fn wrap<E>(
        code: ErrorKind,
        message: impl Into<String>,
        fields: Option<FieldViolations>,
        cause: E,
    ) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        let cause: Box<dyn StdError + Send + Sync> = cause.into();
        match cause.downcast::<DomainError>() {
            Ok(original) => Self {
                code: original.code,
                message: format!("{}: {}", message.into(), original.message),
                fields,
                source: Some(original),
            },
            Err(cause) => Self {
                code,
                message: message.into(),
                fields,
                source: Some(cause),
            },
        }
    }

    pub fn invalid_input(message: impl Into<String>, fields: Option<FieldViolations>) -> Self {
        Self::new(ErrorKind::InvalidInput, message, fields)
    }

    pub fn unauthenticated(message: impl Into<String>, fields: Option<FieldViolations>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message, fields)
    }

    pub fn not_found(message: impl Into<String>, fields: Option<FieldViolations>) -> Self {
        Self::new(ErrorKind::NotFound, message, fields)
    }

    pub fn conflict(message: impl Into<String>, fields: Option<FieldViolations>) -> Self {
        Self::new(ErrorKind::Conflict, message, fields)
    }

    pub fn kind(&self) -> ErrorKind {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> Option<&FieldViolations> {
        self.fields.as_ref()
    }

    /// Innermost error in the cause chain.
    ///
    /// For logging only; never rendered to clients.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for DomainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

/// Untyped errors crossing the boundary are coerced to `Internal` with a
/// generic client-safe message; the original error is kept for diagnostics.
impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        Self::wrap(ErrorKind::Internal, "internal server error", None, err)
    }
}
