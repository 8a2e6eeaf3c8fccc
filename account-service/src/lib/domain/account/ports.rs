use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::LoginRequest;
use crate::domain::account::models::RegisterRequest;
use crate::domain::error::DomainError;

/// Field responsible for a uniqueness conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Username,
    Email,
}

impl ConflictField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictField::Username => "username",
            ConflictField::Email => "email",
        }
    }
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported by the storage adapter.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint fired. Names the offending field so the
    /// service never re-queries to find out which one.
    #[error("{0} already exists")]
    Conflict(ConflictField),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account from an inbound payload.
    ///
    /// # Returns
    /// Public account projection (no password hash)
    ///
    /// # Errors
    /// * `InvalidInput` - payload violated validation rules
    /// * `Conflict` - username or email already registered
    /// * `Internal` - hashing or storage failed
    async fn register(&self, request: RegisterRequest) -> Result<Account, DomainError>;

    /// Verify credentials from an inbound payload.
    ///
    /// # Returns
    /// Identifier of the authenticated account
    ///
    /// # Errors
    /// * `InvalidInput` - payload violated validation rules
    /// * `Unauthenticated` - unknown identifier or wrong password, with an
    ///   identical error either way
    /// * `Internal` - storage failed
    async fn authenticate(&self, request: LoginRequest) -> Result<AccountId, DomainError>;
}

/// Persistence operations for accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account in a single atomic insert.
    ///
    /// The request's `password` field must already hold the hash.
    /// Implementations submit the insert unconditionally and interpret the
    /// resulting constraint violation, so the operation stays correct under
    /// concurrent registration of the same identifiers.
    ///
    /// # Errors
    /// * `Conflict` - username or email already taken
    /// * `Database` - storage operation failed
    async fn create_account(&self, request: &RegisterRequest) -> Result<Account, RepositoryError>;

    /// Look up the stored credential for a username or email.
    ///
    /// Empty identifiers never match.
    ///
    /// # Returns
    /// Optional credential (None if no account matches)
    ///
    /// # Errors
    /// * `Database` - storage operation failed
    async fn find_credential(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Credential>, RepositoryError>;
}
