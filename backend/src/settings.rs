//! Runtime settings loaded via OrthoConfig.
//!
//! Every field can come from a `POSTBOARD_*` environment variable, a CLI flag
//! or a configuration file. Absent values fall back to the defaults exposed
//! by the accessors.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    /// The token secret file could not be read.
    #[error("failed to read token secret file {path}: {message}")]
    SecretFile { path: String, message: String },
}

/// Server settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POSTBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory adapters are used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// HS256 secret for bearer tokens.
    pub token_secret: Option<String>,
    /// File holding the HS256 secret; wins over `token_secret`.
    pub token_secret_file: Option<PathBuf>,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("db_max_connections", &self.db_max_connections)
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .field("token_secret_file", &self.token_secret_file)
            .finish()
    }
}

impl AppSettings {
    /// Return the parsed bind address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the pool size, defaulting to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Resolve the token secret, preferring the file over the inline value.
    ///
    /// A single trailing newline is stripped from file contents. Returns
    /// `None` when neither source is configured.
    ///
    /// # Errors
    ///
    /// [`SettingsError::SecretFile`] when the file cannot be read.
    pub fn token_secret(&self) -> Result<Option<Zeroizing<Vec<u8>>>, SettingsError> {
        if let Some(path) = &self.token_secret_file {
            let mut bytes =
                Zeroizing::new(std::fs::read(path).map_err(|err| SettingsError::SecretFile {
                    path: path.display().to_string(),
                    message: err.to_string(),
                })?);
            if bytes.last() == Some(&b'\n') {
                bytes.pop();
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
            }
            return Ok(Some(bytes));
        }
        Ok(self
            .token_secret
            .as_ref()
            .map(|secret| Zeroizing::new(secret.as_bytes().to_vec())))
    }
}
