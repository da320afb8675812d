//! Server settings and token secret loading.
//!
//! [`ServerSettings`] merges CLI flags, `TASKS_*` environment variables and
//! config files through OrthoConfig. Secret handling follows the build mode:
//! debug builds fall back to an ephemeral secret, release builds refuse to
//! start without a readable one unless `allow_ephemeral_secret` is set.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use taskboard::outbound::security::MIN_SECRET_BYTES;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Build mode used when deciding whether an ephemeral secret is acceptable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// File holding the access token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Permit a generated secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }
}

/// Errors raised while resolving the token secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("failed to read token secret at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("no token secret configured; set TASKS_TOKEN_SECRET_FILE")]
    Missing,
}

/// Resolve the signing secret for access tokens.
///
/// # Errors
///
/// Returns [`SecretError`] when the configured file is unreadable or short,
/// or when no secret is available and an ephemeral one is not permitted.
pub fn load_token_secret(
    settings: &ServerSettings,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, SecretError> {
    let ephemeral_ok = mode == BuildMode::Debug || settings.allow_ephemeral_secret;
    let Some(path) = settings.token_secret_file.as_deref() else {
        if ephemeral_ok {
            warn!("no token secret configured; using an ephemeral secret (dev only)");
            return Ok(ephemeral_secret());
        }
        return Err(SecretError::Missing);
    };

    match read_secret(path) {
        Ok(secret) => Ok(secret),
        Err(SecretError::Read { path, source }) if ephemeral_ok => {
            warn!(
                path = %path.display(),
                error = %source,
                "token secret unreadable; using an ephemeral secret (dev only)"
            );
            Ok(ephemeral_secret())
        }
        Err(err) => Err(err),
    }
}

fn read_secret(path: &Path) -> Result<Zeroizing<Vec<u8>>, SecretError> {
    let bytes = std::fs::read(path)
        .map(Zeroizing::new)
        .map_err(|source| SecretError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if bytes.len() < MIN_SECRET_BYTES {
        return Err(SecretError::TooShort {
            path: path.to_path_buf(),
            length: bytes.len(),
            min_len: MIN_SECRET_BYTES,
        });
    }
    Ok(bytes)
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0_u8; MIN_SECRET_BYTES]);
    OsRng.fill_bytes(secret.as_mut_slice());
    secret
}
