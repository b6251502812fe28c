//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use std::env;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;

    let mut pool_config = PoolConfig::new(database_url);
    if let Ok(raw) = env::var("DB_POOL_MAX_SIZE") {
        let max_size = raw
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid DB_POOL_MAX_SIZE: {e}")))?;
        pool_config = pool_config.with_max_size(max_size);
    }

    let db_pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, db_pool),
    )?;

    health_state.mark_ready();
    info!(%bind_addr, "server started");
    server.await
}
