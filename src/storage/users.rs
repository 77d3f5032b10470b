// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded user database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: email → serialized UserRecord (JSON bytes)
//!
//! Email is the unique key; creating a second record under an existing
//! email fails with [`UserDbError::AlreadyExists`].

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary table: email → serialized UserRecord (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserDbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("user not found: {0}")]
    NotFound(String),

    #[error("user already registered: {0}")]
    AlreadyExists(String),
}

pub type UserDbResult<T> = Result<T, UserDbError>;

// =============================================================================
// Records
// =============================================================================

/// A phone number embedded in a user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phone {
    pub id: Uuid,
    pub number: i64,
    pub city_code: i32,
    pub country_code: String,
}

/// A stored user account.
///
/// `email` is the unique lookup key and doubles as the token subject.
/// `token` holds the most recently issued session token and is overwritten
/// on every sign-up and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC-format hash, never the plaintext.
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub phones: Vec<Phone>,
    /// Current session token.
    pub token: String,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

// =============================================================================
// UserDatabase
// =============================================================================

/// Embedded ACID user database.
pub struct UserDatabase {
    db: Database,
}

impl UserDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> UserDbResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert a new user. Fails with `AlreadyExists` if the email is taken.
    pub fn create_user(&self, user: &UserRecord) -> UserDbResult<()> {
        let json = serde_json::to_vec(user)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;
            if table.get(user.email.as_str())?.is_some() {
                return Err(UserDbError::AlreadyExists(user.email.clone()));
            }
            table.insert(user.email.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Look up a user by email.
    pub fn get_by_email(&self, email: &str) -> UserDbResult<UserRecord> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;

        let guard = table
            .get(email)?
            .ok_or_else(|| UserDbError::NotFound(email.to_string()))?;
        let user = serde_json::from_slice(guard.value())?;
        Ok(user)
    }

    /// Overwrite an existing user record (token rotation, last-login bump).
    ///
    /// Concurrent updates for the same email are serialized by redb; the
    /// last committed write wins.
    pub fn update_user(&self, user: &UserRecord) -> UserDbResult<()> {
        let json = serde_json::to_vec(user)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;
            if table.get(user.email.as_str())?.is_none() {
                return Err(UserDbError::NotFound(user.email.clone()));
            }
            table.insert(user.email.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_test_db() -> (UserDatabase, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let db = UserDatabase::open(&dir.path().join("users.redb")).expect("open database");
        (db, dir)
    }

    fn sample_user(email: &str) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            name: Some("Ada".to_string()),
            phones: vec![Phone {
                id: Uuid::new_v4(),
                number: 87654321,
                city_code: 11,
                country_code: "54".to_string(),
            }],
            token: "token-1".to_string(),
            is_active: true,
            created: now,
            last_login: now,
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let (db, _dir) = open_test_db();
        let user = sample_user("a@example.com");

        db.create_user(&user).unwrap();
        let stored = db.get_by_email("a@example.com").unwrap();
        assert_eq!(stored, user);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (db, _dir) = open_test_db();
        let user = sample_user("dup@x.com");

        db.create_user(&user).unwrap();
        let mut second = sample_user("dup@x.com");
        second.id = Uuid::new_v4();

        let err = db.create_user(&second).unwrap_err();
        assert!(matches!(err, UserDbError::AlreadyExists(email) if email == "dup@x.com"));
    }

    #[test]
    fn get_missing_user_errors() {
        let (db, _dir) = open_test_db();
        let err = db.get_by_email("missing@x.com").unwrap_err();
        assert!(matches!(err, UserDbError::NotFound(_)));
    }

    #[test]
    fn update_overwrites_token_and_last_login() {
        let (db, _dir) = open_test_db();
        let mut user = sample_user("a@example.com");
        db.create_user(&user).unwrap();

        user.token = "token-2".to_string();
        user.last_login = Utc::now();
        db.update_user(&user).unwrap();

        let stored = db.get_by_email("a@example.com").unwrap();
        assert_eq!(stored.token, "token-2");
        assert_eq!(stored.last_login, user.last_login);
    }

    #[test]
    fn update_missing_user_errors() {
        let (db, _dir) = open_test_db();
        let err = db.update_user(&sample_user("ghost@x.com")).unwrap_err();
        assert!(matches!(err, UserDbError::NotFound(_)));
    }
}
