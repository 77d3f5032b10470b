// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access policy: which paths require an authenticated identity.
//!
//! Registration is the single public API operation. The Swagger surface
//! (`/docs`, `/api-doc`) is also public since it is documentation, not an
//! API operation. Everything else, known route or not, requires the
//! interceptor to have attached an identity.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthenticatedIdentity};
use crate::state::AppState;

/// Path prefixes reachable without authentication.
const PUBLIC_PATHS: &[&str] = &["/sign-up", "/docs", "/api-doc"];

/// Static table of public path prefixes.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    public_paths: &'static [&'static str],
}

impl AccessPolicy {
    pub const fn new() -> Self {
        Self {
            public_paths: PUBLIC_PATHS,
        }
    }

    /// Whether a request path requires an authenticated identity.
    pub fn requires_auth(&self, path: &str) -> bool {
        !self
            .public_paths
            .iter()
            .any(|public| path.starts_with(public))
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Policy gate middleware.
///
/// Runs after [`super::middleware::authenticate`]: an anonymous request to
/// a protected path is rejected here with a 401, before any handler or
/// business logic runs.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if state.policy.requires_auth(path)
        && request.extensions().get::<AuthenticatedIdentity>().is_none()
    {
        return AuthError::Unauthenticated.into_response();
    }

    next.run(request).await
}
