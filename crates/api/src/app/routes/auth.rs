//! Registration and login.

use std::sync::Arc;

use axum::{Extension, Json, Router, routing::post};
use serde_json::json;

use ledgerbridge_auth::{hash_password, verify_password};
use ledgerbridge_store::{NewUser, StoreError, UserStore};

use crate::app::dto::{Envelope, LoginForm, RegisterRequest, TokenResponse, UserResponse};
use crate::app::errors::{ApiError, ApiForm, ApiJson};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(login))
}

fn already_registered() -> Envelope<UserResponse> {
    Envelope::error_with(
        400,
        "Email already registered",
        vec![json!({ "field": "email", "message": "Email already exists" })],
    )
}

/// POST /v1/auth/register. Open to anyone; accounts start inactive and wait
/// for an administrator.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    if services.users.find_by_email(&body.email).await?.is_some() {
        return Ok(Json(already_registered()));
    }

    let hashed_password = hash_password(&body.password)?;
    let created = services
        .users
        .create(NewUser {
            email: body.email,
            hashed_password,
            is_active: false,
            is_superuser: false,
        })
        .await;

    match created {
        Ok(user) => Ok(Json(Envelope::success(
            "User registered successfully. Please contact admin for activation.",
            Some(UserResponse::from(user)),
        ))),
        // Lost a race with a concurrent registration of the same email.
        Err(StoreError::DuplicateEmail) => Ok(Json(already_registered())),
        Err(err) => Err(err.into()),
    }
}

/// POST /v1/auth/token. OAuth2-style password form.
///
/// Bad credentials and inactive accounts fail differently on purpose: 401
/// says "log in again", the 403 says "wait for an administrator".
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = services.users.find_by_email(&form.username).await?;

    let matches = user
        .as_ref()
        .is_some_and(|u| verify_password(&form.password, &u.hashed_password));
    let Some(user) = user.filter(|_| matches) else {
        return Err(ApiError::unauthenticated("Incorrect email or password"));
    };

    if !user.is_active {
        return Err(ApiError::forbidden(
            "User account is inactive. Please contact an admin.",
        ));
    }

    let access_token = services.tokens.issue(&user.email, services.now())?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
