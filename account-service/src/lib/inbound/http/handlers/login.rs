use auth::SessionClaims;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::request_id_from;
use super::ApiError;
use crate::domain::account::models::LoginRequest;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::error::DomainError;
use crate::domain::error::ErrorKind;
use crate::inbound::http::cookies;
use crate::inbound::http::router::AppState;

const OP: &str = "accounts.login";

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request_id = request_id_from(&headers);

    let Json(body) = payload.map_err(|_| {
        ApiError::new(
            OP,
            request_id.clone(),
            DomainError::invalid_input("invalid JSON", None),
        )
    })?;

    let account_id = state
        .account_service
        .authenticate(body)
        .await
        .map_err(|e| ApiError::new(OP, request_id.clone(), e))?;

    // Session issuance stays with the collaborator; the handler only
    // places the signed token into the cookie.
    let claims = SessionClaims::for_subject(account_id, state.session_ttl_hours);
    let token = state.sessions.issue(&claims).map_err(|e| {
        ApiError::new(
            OP,
            request_id.clone(),
            DomainError::wrap(ErrorKind::Internal, "failed to issue session token", None, e),
        )
    })?;

    let cookie = cookies::session_cookie(
        cookies::SESSION_COOKIE,
        &token,
        state.session_ttl_hours * 3600,
    )
    .map_err(|e| {
        ApiError::new(
            OP,
            request_id,
            DomainError::wrap(ErrorKind::Internal, "failed to build session cookie", None, e),
        )
    })?;

    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
