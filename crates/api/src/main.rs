use std::sync::Arc;

use ledgerbridge_api::app;
use ledgerbridge_api::app::services::{self, AppServices};
use ledgerbridge_api::{config::Config, telemetry};
use ledgerbridge_auth::TokenService;
use ledgerbridge_engine::TcpEngineClient;
use ledgerbridge_store::PgUserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let config = Config::from_env();

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let users = PgUserStore::new(pool);
    users.migrate().await?;

    let engine = TcpEngineClient::connect(&config.engine_addr, config.engine_timeout).await?;

    let app_services = Arc::new(AppServices::new(
        Arc::new(engine),
        Arc::new(users),
        TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_minutes),
    ));

    services::ensure_bootstrap_admin(
        app_services.users.as_ref(),
        &config.admin_email,
        &config.admin_password,
    )
    .await?;

    let app = app::build_app(Arc::clone(&app_services));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
