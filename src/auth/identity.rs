// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped authenticated identity.

/// The identity a verified token resolves to.
///
/// Lives in the request's extension map for exactly one request; it is
/// never persisted and there is no ambient or thread-local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// Subject claim of the verified token (the account email).
    pub subject: String,
}

impl AuthenticatedIdentity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}
