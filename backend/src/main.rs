//! Recipe API entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_api::inbound::http::health::HealthState;
use recipe_api::inbound::http::session_config::{BuildMode, session_settings_from_env};
use recipe_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

#[cfg(feature = "metrics")]
use server::build_metrics;
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr()?;

    let config = ServerConfig::new(
        session,
        bind_addr,
        #[cfg(feature = "metrics")]
        build_metrics()?,
    );
    let config = match settings.database_url.as_deref() {
        Some(url) => {
            if settings.run_migrations() {
                run_pending_migrations(url)
                    .await
                    .map_err(std::io::Error::other)?;
            }
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_size()))
                .await
                .map_err(std::io::Error::other)?;
            config.with_db_pool(pool)
        }
        None => config,
    };

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "recipe api listening");
    let result = server.await;
    health_state.mark_draining();
    result
}
