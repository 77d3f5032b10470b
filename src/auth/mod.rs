// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session-token authentication for the account API.
//!
//! ## Auth Flow
//!
//! 1. `POST /sign-up` issues a signed session token for the new account
//! 2. Clients send `Authorization: Bearer <token>` on every request
//! 3. The interceptor ([`middleware::authenticate`]) verifies the token and
//!    attaches an [`AuthenticatedIdentity`] to the request; failures degrade
//!    to an anonymous request, they never reject by themselves
//! 4. The policy gate ([`policy::enforce`]) rejects anonymous requests to
//!    any path the [`AccessPolicy`] does not list as public
//! 5. `GET /login` verifies the presented token and rotates it
//!
//! ## Security
//!
//! - Tokens are HS256-signed with a single process-wide secret, decoded
//!   from configuration once at startup
//! - Expiry is exact: no clock-skew leeway
//! - Signature comparison happens inside the `jsonwebtoken` crate in
//!   constant time

pub mod codec;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod identity;
pub mod middleware;
pub mod policy;

pub use codec::TokenCodec;
pub use credentials::{CredentialService, LoginGrant};
pub use error::AuthError;
pub use extractor::AuthorizationHeader;
pub use identity::AuthenticatedIdentity;
pub use policy::AccessPolicy;

/// Authorization header scheme marker, including the trailing space.
pub const BEARER_SCHEME: &str = "Bearer ";
