// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AccessPolicy, CredentialService, TokenCodec};
use crate::storage::UserDatabase;

/// Shared application state.
///
/// The token codec (and the signing key inside it) is read-only after
/// startup, so it is shared without locking; redb serializes its own
/// transactions.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<UserDatabase>,
    pub tokens: Arc<TokenCodec>,
    pub credentials: CredentialService,
    pub policy: AccessPolicy,
}

impl AppState {
    pub fn new(db: UserDatabase, tokens: TokenCodec) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            db: Arc::new(db),
            credentials: CredentialService::new(tokens.clone()),
            tokens,
            policy: AccessPolicy::new(),
        }
    }
}
