// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session-token codec.
//!
//! Tokens are compact HS256-signed JWTs carrying the account email as the
//! subject, an issued-at time, and an exact expiry. The signing key is
//! injected at construction and immutable for the process lifetime; `issue`
//! and `verify` share it without synchronization.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject (account email)
    sub: String,
    /// Issued at (Unix timestamp)
    iat: i64,
    /// Expiration time (Unix timestamp)
    exp: i64,
    /// Token ID, unique per issuance so rotated tokens never collide
    jti: String,
}

/// Issues and verifies signed session tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Fixed token lifetime.
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from already-decoded secret bytes and a lifetime in
    /// milliseconds. Decoding the configured base64 secret (and failing
    /// startup on bad input) is the configuration layer's job.
    pub fn new(secret: &[u8], ttl_ms: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::milliseconds(ttl_ms),
        }
    }

    /// Issue a token for a subject with `exp = now + ttl`.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::MalformedToken)
    }

    /// Verify a serialized token and return its subject.
    ///
    /// Failures are classified, never panicked on: expired, bad signature,
    /// unsupported algorithm, or structurally malformed.
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; the default 60s leeway would let short-lived
        // tokens outlive their exp claim.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AuthError::UnsupportedToken,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims.sub)
    }
}
