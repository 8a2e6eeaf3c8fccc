use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;

/// Name of the session cookie set on successful login.
pub const SESSION_COOKIE: &str = "session_token";

/// Build a Set-Cookie value for a session token.
pub fn session_cookie(
    name: &str,
    value: &str,
    max_age_secs: i64,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    ))
}
