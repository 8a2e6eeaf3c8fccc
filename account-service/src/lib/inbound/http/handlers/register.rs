use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::request_id_from;
use super::ApiError;
use crate::domain::account::models::Account;
use crate::domain::account::models::RegisterRequest;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::error::DomainError;
use crate::inbound::http::router::AppState;

const OP: &str = "accounts.register";

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponseData>), ApiError> {
    let request_id = request_id_from(&headers);

    // Strict decoding: unknown fields, malformed bodies, and bodies over
    // the size ceiling all surface here.
    let Json(body) = payload.map_err(|_| {
        ApiError::new(
            OP,
            request_id.clone(),
            DomainError::invalid_input("invalid JSON", None),
        )
    })?;

    let account = state
        .account_service
        .register(body)
        .await
        .map_err(|e| ApiError::new(OP, request_id, e))?;

    tracing::info!(
        username = %account.username,
        email = %account.email,
        "account created"
    );

    Ok((StatusCode::CREATED, Json((&account).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&Account> for RegisterResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.0,
            username: account.username.clone(),
            email: account.email.clone(),
        }
    }
}
