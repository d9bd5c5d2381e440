//! Server entry-point: loads settings, wires storage and auth, serves the API.

mod server;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;
use zeroize::Zeroizing;

use postboard::domain::{AuthorProfile, UserId};
use postboard::inbound::http::health::HealthState;
use postboard::outbound::auth::JwtTokenVerifier;
use postboard::outbound::memory::{InMemoryPostRepository, InMemoryUserDirectory};
use postboard::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use postboard::settings::AppSettings;

use server::{ServerConfig, Storage, create_server};

const DEMO_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let verifier = Arc::new(JwtTokenVerifier::new(&load_secret(&settings)?)?);
    let storage = build_storage(&settings, &verifier).await?;

    let config = ServerConfig::new(bind_addr, storage, verifier);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("postboard")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "postboard listening");
    server.await?;
    Ok(())
}

fn load_secret(settings: &AppSettings) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(secret) = settings.token_secret()? {
        return Ok(secret);
    }
    if cfg!(debug_assertions) {
        warn!("no token secret configured; using an ephemeral one (dev only)");
        let mut secret = Zeroizing::new(Vec::with_capacity(32));
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        return Ok(secret);
    }
    Err(eyre!(
        "POSTBOARD_TOKEN_SECRET or POSTBOARD_TOKEN_SECRET_FILE must be set"
    ))
}

async fn build_storage(settings: &AppSettings, verifier: &JwtTokenVerifier) -> Result<Storage> {
    if let Some(url) = settings.database_url.as_deref() {
        run_migrations(url).await?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
            .await?;
        return Ok(Storage::Postgres(pool));
    }

    warn!("no database configured; posts are kept in memory and lost on restart");
    let users = Arc::new(InMemoryUserDirectory::new());
    if cfg!(debug_assertions) {
        let demo = UserId::random();
        users.insert(demo.clone(), AuthorProfile::new("Demo User", "")?)?;
        let token = verifier.issue(&demo, DEMO_TOKEN_TTL)?;
        info!(user_id = %demo, %token, "registered demo user (dev only)");
    }
    Ok(Storage::Memory {
        posts: Arc::new(InMemoryPostRepository::new()),
        users,
    })
}

/// Build Prometheus middleware, serving without metrics if that fails.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make: F) -> Option<actix_web_prom::PrometheusMetrics>
where
    F: FnOnce() -> std::result::Result<actix_web_prom::PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}
