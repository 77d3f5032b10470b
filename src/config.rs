// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup. The signing
//! secret is decoded here so every later consumer works with raw key bytes;
//! a secret that is not valid base64 makes the authentication subsystem
//! unusable, so it is the one fatal startup condition.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Base64-encoded token signing secret | Required |
//! | `JWT_EXPIRATION_MS` | Token lifetime in milliseconds | Required |
//! | `DATA_DIR` | Root directory for the user database | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::path::PathBuf;

use base64ct::{Base64, Encoding};

/// Environment variable name for the base64-encoded signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token lifetime in milliseconds.
pub const JWT_EXPIRATION_ENV: &str = "JWT_EXPIRATION_MS";

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{JWT_SECRET_ENV} is not set")]
    MissingSecret,

    #[error("{JWT_SECRET_ENV} is not valid base64")]
    InvalidSecret,

    #[error("{JWT_EXPIRATION_ENV} is not set")]
    MissingExpiration,

    #[error("{JWT_EXPIRATION_ENV} is not a valid number of milliseconds: {0}")]
    InvalidExpiration(String),

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Process-wide configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Raw signing key bytes, decoded from `JWT_SECRET`.
    pub signing_key: Vec<u8>,
    /// Token lifetime in milliseconds.
    pub token_ttl_ms: i64,
    /// Root directory for persistent data.
    pub data_dir: PathBuf,
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// The signing secret is decoded from base64 here, once. Callers should
    /// treat any error as fatal and refuse to start.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret)?;
        let signing_key =
            Base64::decode_vec(secret.trim()).map_err(|_| ConfigError::InvalidSecret)?;

        let expiration =
            env::var(JWT_EXPIRATION_ENV).map_err(|_| ConfigError::MissingExpiration)?;
        let token_ttl_ms: i64 = expiration
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidExpiration(expiration.clone()))?;

        let data_dir =
            PathBuf::from(env::var(DATA_DIR_ENV).unwrap_or_else(|_| "/data".to_string()));

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port_raw = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw.clone()))?;

        Ok(Self {
            signing_key,
            token_ttl_ms,
            data_dir,
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_secret() {
        // "secret" in standard base64
        let key = Base64::decode_vec("c2VjcmV0").unwrap();
        assert_eq!(key, b"secret");
    }

    #[test]
    fn rejects_invalid_base64_secret() {
        assert!(Base64::decode_vec("not base64!!!").is_err());
    }
}
