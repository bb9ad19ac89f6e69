use axum::Router;

pub mod accounts;
pub mod admin;
pub mod auth;
pub mod system;
pub mod transfers;

/// Router for all bearer-authenticated endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .nest("/v1/admin", admin::router())
        .nest("/v1/accounts", accounts::router())
        .nest("/v1/transfers", transfers::router())
}
