//! User administration. Every handler here requires the Superuser tier.

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::{Extension, Json, Router, routing::get, routing::post};

use ledgerbridge_store::UserStore;

use crate::app::dto::{Envelope, ListUsersParams, UserResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::{self, CurrentUser};

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/activate", post(activate_user))
        .route("/users/:id/deactivate", post(deactivate_user))
}

/// GET /v1/admin/users?skip&limit
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<Envelope<Vec<UserResponse>>>, ApiError> {
    context::require_superuser(&current)?;

    let users = services.users.list(params.skip, params.limit).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(Envelope::success(
        "Users retrieved successfully",
        Some(data),
    )))
}

/// POST /v1/admin/users/:id/activate
pub async fn activate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    set_active(&services, &current, id, true, "User activated successfully").await
}

/// POST /v1/admin/users/:id/deactivate
pub async fn deactivate_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    set_active(
        &services,
        &current,
        id,
        false,
        "User deactivated successfully",
    )
    .await
}

async fn set_active(
    services: &AppServices,
    current: &CurrentUser,
    id: i64,
    is_active: bool,
    message: &str,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    context::require_superuser(current)?;

    match services.users.set_active(id, is_active).await? {
        Some(user) => Ok(Json(Envelope::success(
            message,
            Some(UserResponse::from(user)),
        ))),
        None => Ok(Json(Envelope::error(404, "User not found"))),
    }
}
