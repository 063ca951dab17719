use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Default cap on uploaded logo size (2 MiB).
pub const DEFAULT_MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// Everything except the database URL and the JWT secret has a local
/// development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Browser origins allowed by CORS, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Directory holding storage buckets (default: `storage`).
    pub storage_root: PathBuf,
    /// Origin used to build public object URLs (default: `http://localhost:3000`).
    pub public_base_url: String,
    /// Largest accepted logo upload in bytes.
    pub max_logo_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_ROOT`         | `storage`                  |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000`    |
    /// | `MAX_LOGO_BYTES`       | `2097152`                  |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics when a variable is set to a value that does not parse.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            storage_root: env_or("STORAGE_ROOT", PathBuf::from("storage")),
            public_base_url: env_or("PUBLIC_BASE_URL", "http://localhost:3000".to_string()),
            max_logo_bytes: env_or("MAX_LOGO_BYTES", DEFAULT_MAX_LOGO_BYTES),
        }
    }
}

/// Read and parse `name`, falling back to `default` when it is unset.
pub(crate) fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
