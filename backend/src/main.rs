//! cascii server entry point: loads settings, applies migrations and serves
//! the REST API.

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cascii::inbound::http::health::HealthState;
use cascii::inbound::http::session::SessionCookieConfig;
use cascii::outbound::persistence::{DbPool, run_pending_migrations};
use cascii::server::{Repositories, ServerConfig, build_http_state, create_server};
use cascii::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .context("load configuration")?
        .validate()
        .context("validate configuration")?;

    if settings.run_migrations {
        let applied = run_pending_migrations(settings.pool.database_url())
            .await
            .context("apply database migrations")?;
        info!(applied, "database migrations applied");
    }

    let pool = DbPool::new(settings.pool.clone())
        .await
        .context("build database pool")?;
    let http_state = build_http_state(
        Repositories::diesel(&pool),
        settings.key_lengths,
        SessionCookieConfig::new(settings.cookie_secure),
    )
    .context("assemble HTTP state")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, http_state),
    )
    .context("bind HTTP listener")?;
    info!(
        bind_addr = %settings.bind_addr,
        min_key_length = settings.key_lengths.min(),
        max_key_length = settings.key_lengths.max(),
        "server listening"
    );

    let outcome = server.await;
    health_state.mark_draining();
    outcome.context("serve HTTP")
}
