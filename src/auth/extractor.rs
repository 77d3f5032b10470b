// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the raw `Authorization` header.
//!
//! The login handler needs the presented credential itself (its subject is
//! the account to log into), not just the identity the interceptor
//! attached, so it extracts the header and hands it to the credential
//! service.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::AuthError;

/// Raw `Authorization` header value, required to be present and readable.
pub struct AuthorizationHeader(pub String);

impl<S> FromRequestParts<S> for AuthorizationHeader
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        Ok(AuthorizationHeader(value.to_string()))
    }
}
