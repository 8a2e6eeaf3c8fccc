use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::LoginRequest;
use crate::domain::account::models::RegisterRequest;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::RepositoryError;
use crate::domain::account::validate;
use crate::domain::error::DomainError;
use crate::domain::error::ErrorKind;
use crate::domain::error::FieldViolations;

/// One message for every authentication failure, so responses cannot be
/// used to tell an unknown identifier from a wrong password.
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Domain service implementation for account operations.
///
/// Stateless across calls; the repository and hasher are injected at
/// construction and shared by reference.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Credential hashing implementation
    pub fn new(repository: Arc<R>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, mut request: RegisterRequest) -> Result<Account, DomainError> {
        validate::register_request(&request)?;

        // The plaintext never leaves the service: the request field is
        // overwritten with the hash before the storage call.
        let password_hash = self
            .password_hasher
            .hash(&request.password)
            .map_err(|e| DomainError::wrap(ErrorKind::Internal, "failed to hash password", None, e))?;
        request.password = password_hash;

        match self.repository.create_account(&request).await {
            Ok(account) => Ok(account),
            Err(RepositoryError::Conflict(field)) => {
                let mut fields = FieldViolations::new();
                fields.insert(field.to_string(), "already exists".to_string());
                Err(DomainError::conflict(
                    format!("an account with this {field} already exists"),
                    Some(fields),
                ))
            }
            Err(RepositoryError::Database(e)) => Err(DomainError::wrap(
                ErrorKind::Internal,
                "failed to create account",
                None,
                e,
            )),
        }
    }

    async fn authenticate(&self, request: LoginRequest) -> Result<AccountId, DomainError> {
        validate::login_request(&request)?;

        let credential = self
            .repository
            .find_credential(&request.username, &request.email)
            .await
            .map_err(|e| {
                DomainError::wrap(ErrorKind::Internal, "failed to look up credentials", None, e)
            })?;

        let Some(credential) = credential else {
            return Err(DomainError::unauthenticated(INVALID_CREDENTIALS, None));
        };

        if !self
            .password_hasher
            .verify(&request.password, &credential.password_hash)
        {
            return Err(DomainError::unauthenticated(INVALID_CREDENTIALS, None));
        }

        Ok(credential.account_id)
    }
}
