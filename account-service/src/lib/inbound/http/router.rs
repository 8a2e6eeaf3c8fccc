use std::sync::Arc;
use std::time::Duration;

use auth::SessionSigner;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::register::register;
use crate::domain::account::service::AccountService;
use crate::outbound::repositories::account::PostgresAccountRepository;

/// Request bodies above this many bytes are rejected before decoding.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<PostgresAccountRepository>>,
    pub sessions: Arc<SessionSigner>,
    pub session_ttl_hours: i64,
}

pub fn create_router(
    account_service: Arc<AccountService<PostgresAccountRepository>>,
    sessions: Arc<SessionSigner>,
    session_ttl_hours: i64,
) -> Router {
    let state = AppState {
        account_service,
        sessions,
        session_ttl_hours,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace_layer)
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
