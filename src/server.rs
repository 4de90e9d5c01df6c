//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, service wiring, and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::application::services::{AuthService, ResolveService, RuleService, UserService};
use crate::infrastructure::persistence::{PgRuleRepository, PgTokenRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (sized and bounded per config)
/// - Pending migrations
/// - Repository and service wiring
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Migrations fail to apply
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool_arc = Arc::new(pool.clone());
    let rule_repository = Arc::new(PgRuleRepository::new(pool_arc.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool_arc.clone()));
    let token_repository = Arc::new(PgTokenRepository::new(pool_arc));

    let rule_service = Arc::new(RuleService::new(rule_repository.clone()));
    let resolve_service = Arc::new(ResolveService::new(rule_repository));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        config.token_signing_secret.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repository,
        config.token_signing_secret.clone(),
    ));

    let state = AppState::new(
        pool,
        rule_service,
        resolve_service,
        auth_service,
        user_service,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
