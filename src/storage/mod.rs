// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persistent storage for user records.

pub mod users;

pub use users::{Phone, UserDatabase, UserDbError, UserDbResult, UserRecord};
