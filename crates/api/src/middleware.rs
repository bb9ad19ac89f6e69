use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use ledgerbridge_store::UserStore;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Resolve the bearer token into a [`CurrentUser`] extension.
///
/// Everything short of a decodable token naming a known subject is a 401;
/// tier checks (active/superuser) happen per-route once the user is loaded.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        extract_bearer(req.headers()).ok_or_else(|| ApiError::unauthenticated("Not authenticated"))?;

    let claims = state
        .services
        .tokens
        .decode(token)
        .ok_or_else(|| ApiError::unauthenticated("Invalid or expired token"))?;

    let user = state
        .services
        .users
        .find_by_email(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("User not found"))?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Log one line per request and echo the correlation id back to the caller.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:016x}", REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)));

    let start = Instant::now();
    let mut response = next.run(req).await;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

    tracing::info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        request_id = %request_id,
        "request"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}
