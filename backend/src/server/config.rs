//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use postboard::domain::ports::AccessTokenVerifier;
use postboard::outbound::memory::{InMemoryPostRepository, InMemoryUserDirectory};
use postboard::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Where posts and author profiles live.
#[derive(Clone)]
pub enum Storage {
    /// PostgreSQL through a pooled Diesel connection.
    Postgres(DbPool),
    /// Process-local stores; contents vanish on restart.
    Memory {
        posts: Arc<InMemoryPostRepository>,
        users: Arc<InMemoryUserDirectory>,
    },
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: Storage,
    pub(crate) verifier: Arc<dyn AccessTokenVerifier>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        storage: Storage,
        verifier: Arc<dyn AccessTokenVerifier>,
    ) -> Self {
        Self {
            bind_addr,
            storage,
            verifier,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
