//! The single responder for request-path failures.
//!
//! Every fault in a handler funnels into [`ApiError`]; its `IntoResponse`
//! impl is the one place transport status codes are chosen, and the body is
//! always the uniform envelope, never a bare string or a stack trace.
//! Domain outcomes (duplicate registration, partial batch failure, admin
//! target not found) are not errors at this level: handlers encode those in
//! the envelope on a 200 transport.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use ledgerbridge_auth::{GateError, PasswordError, TokenError};
use ledgerbridge_core::DomainError;
use ledgerbridge_engine::EngineError;
use ledgerbridge_store::StoreError;

use crate::app::dto::Envelope;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Validation(String),

    #[error("ledger engine failure: {0}")]
    Engine(#[from] EngineError),

    #[error("credential store failure: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthenticated => Self::Unauthenticated("Invalid or expired token".into()),
            GateError::Inactive => Self::Forbidden("Inactive user. Contact administrator.".into()),
            GateError::InsufficientPrivilege => {
                Self::Forbidden("Superuser privileges required".into())
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated(msg) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(Envelope::<()>::error(401, msg)),
            )
                .into_response(),
            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                Json(Envelope::<()>::error(403, msg)),
            )
                .into_response(),
            ApiError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(Envelope::<()>::error(422, msg)),
            )
                .into_response(),
            ApiError::Engine(err) => {
                tracing::error!(error = %err, "ledger engine request failed");
                internal_response(err.to_string())
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "credential store request failed");
                internal_response(err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                internal_response(msg)
            }
        }
    }
}

/// Generic client message plus the captured error text, never internals.
fn internal_response(detail: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::<()>::error_with(
            500,
            "Internal server error. Please contact administrator.",
            vec![json!({ "detail": detail })],
        )),
    )
        .into_response()
}

/// `Json` with envelope-shaped rejections: a malformed body is a validation
/// failure, not a framework-formatted one-liner.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}

/// Urlencoded-form twin of [`ApiJson`], for the token endpoint.
pub struct ApiForm<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Form::<T>::from_request(req, state).await {
            Ok(axum::Form(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}
