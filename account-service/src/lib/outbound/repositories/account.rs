use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::Credential;
use crate::domain::account::models::RegisterRequest;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::ConflictField;
use crate::domain::account::ports::RepositoryError;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: AccountId(row.id),
            username: row.username,
            email: row.email,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    password_hash: String,
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create_account(&self, request: &RegisterRequest) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email
            "#,
        )
        .bind(&request.username)
        .bind(&request.email)
        .bind(&request.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("accounts_username_key") {
                        return RepositoryError::Conflict(ConflictField::Username);
                    }
                    if db_err.constraint() == Some("accounts_email_key") {
                        return RepositoryError::Conflict(ConflictField::Email);
                    }
                }
            }
            RepositoryError::Database(anyhow::Error::new(e).context("postgres insert accounts"))
        })?;

        Ok(row.into())
    }

    async fn find_credential(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Credential>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, password_hash
            FROM accounts
            WHERE ($1 <> '' AND username = $1)
               OR ($2 <> '' AND email = $2)
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::Database(anyhow::Error::new(e).context("postgres select credential"))
        })?;

        Ok(row.map(|r| Credential {
            account_id: AccountId(r.id),
            password_hash: r.password_hash,
        }))
    }
}
