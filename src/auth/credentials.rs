// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential use-cases: token issuance at registration and verify-then-
//! rotate at login.
//!
//! Tokens are stateless HMAC artifacts with no revocation list, so
//! "logout" and "rotate" both reduce to letting the old token expire;
//! issuing a fresh token on every login limits the blast radius of a
//! leaked token to one login interval.

use std::sync::Arc;

use super::{AuthError, TokenCodec, BEARER_SCHEME};

/// Result of a successful login: who logged in, and their fresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    /// Subject recovered from the presented token.
    pub subject: String,
    /// Newly issued replacement token.
    pub token: String,
}

/// Authentication use-cases over the shared [`TokenCodec`].
#[derive(Clone)]
pub struct CredentialService {
    codec: Arc<TokenCodec>,
}

impl CredentialService {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Issue the initial token for a freshly created account. The caller
    /// stores it on the user record and returns it to the client.
    pub fn issue_on_registration(&self, subject: &str) -> Result<String, AuthError> {
        self.codec.issue(subject)
    }

    /// Verify the presented bearer credential and rotate it.
    ///
    /// The subject encoded in the presented token names the account being
    /// logged into; the caller is responsible for resolving it to a stored
    /// user and persisting the rotated token. The old token is not
    /// invalidated, it simply expires on its own schedule.
    pub fn login(&self, authorization: &str) -> Result<LoginGrant, AuthError> {
        let token = authorization
            .strip_prefix(BEARER_SCHEME)
            .ok_or(AuthError::InvalidAuthHeader)?;

        let subject = self.codec.verify(token.trim())?;
        let rotated = self.codec.issue(&subject)?;

        Ok(LoginGrant {
            subject,
            token: rotated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_service() -> CredentialService {
        CredentialService::new(Arc::new(TokenCodec::new(
            b"test-secret-key-for-testing-only",
            60_000,
        )))
    }

    #[test]
    fn registration_token_carries_subject() {
        let service = create_service();
        let token = service.issue_on_registration("a@example.com").unwrap();

        let grant = service.login(&format!("Bearer {token}")).unwrap();
        assert_eq!(grant.subject, "a@example.com");
    }

    #[test]
    fn login_rotates_the_token() {
        let service = create_service();
        let token = service.issue_on_registration("a@example.com").unwrap();

        let grant = service.login(&format!("Bearer {token}")).unwrap();
        assert_ne!(grant.token, token, "login must issue a fresh token");
        assert_eq!(grant.subject, "a@example.com");
    }

    #[test]
    fn rotated_out_token_still_logs_in() {
        // Stateless tokens have no server-side binding: an old token stays
        // valid until it expires, rotation or not.
        let service = create_service();
        let old = service.issue_on_registration("a@example.com").unwrap();
        let _ = service.login(&format!("Bearer {old}")).unwrap();

        let again = service.login(&format!("Bearer {old}")).unwrap();
        assert_eq!(again.subject, "a@example.com");
    }

    #[test]
    fn missing_bearer_scheme_is_rejected() {
        let service = create_service();
        let token = service.issue_on_registration("a@example.com").unwrap();

        assert_eq!(
            service.login(&token).unwrap_err(),
            AuthError::InvalidAuthHeader
        );
        assert_eq!(
            service.login(&format!("Basic {token}")).unwrap_err(),
            AuthError::InvalidAuthHeader
        );
    }

    #[test]
    fn invalid_token_fails_verification() {
        let service = create_service();
        assert_eq!(
            service.login("Bearer junk").unwrap_err(),
            AuthError::MalformedToken
        );
    }
}
