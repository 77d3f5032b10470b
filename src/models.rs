// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! Sign-up requests are validated field by field; failures are collected
//! and reported together, one message per invalid field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::storage::users::{Phone, UserRecord};

// =============================================================================
// Requests
// =============================================================================

/// A phone number attached to an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PhoneDto {
    /// Identifier assigned at creation. Absent in requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Subscriber number.
    pub number: i64,
    /// City/area code.
    pub city_code: i32,
    /// Country dialing code.
    pub country_code: String,
}

/// Request body for `POST /sign-up`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    /// Account email, used as the unique lookup key and token subject.
    pub email: String,
    /// Plaintext password; stored only as an Argon2 hash.
    pub password: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Phone numbers, stored as submitted.
    #[serde(default)]
    pub phones: Vec<PhoneDto>,
}

impl SignUpRequest {
    /// Validate the request, collecting one message per invalid field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !is_valid_email(&self.email) {
            errors.push("email: must be a valid email address".to_string());
        }

        if !is_valid_password(&self.password) {
            errors.push(
                "password: must be 8-12 alphanumeric characters with at least one \
                 uppercase letter, one lowercase letter, and two digits"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Structural email check: one `@`, a non-empty local part of
/// `[A-Za-z0-9+_.-]`, and a non-empty domain of `[A-Za-z0-9.-]`.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'));
    let domain_ok = !domain.is_empty()
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));

    local_ok && domain_ok
}

/// Password rule: 8-12 ASCII alphanumerics, at least one lowercase letter,
/// one uppercase letter, and two digits.
fn is_valid_password(password: &str) -> bool {
    let len_ok = (8..=12).contains(&password.chars().count());
    let alnum_ok = password.chars().all(|c| c.is_ascii_alphanumeric());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let digits = password.chars().filter(char::is_ascii_digit).count();

    len_ok && alnum_ok && has_lower && has_upper && digits >= 2
}

// =============================================================================
// Responses
// =============================================================================

/// Response body for `POST /sign-up`.
///
/// Deliberately omits email, password, and phones; the client already
/// knows what it submitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpResponse {
    /// Account identifier.
    pub id: Uuid,
    /// When the account was created.
    pub created: DateTime<Utc>,
    /// Last login time (equals `created` at sign-up).
    pub last_login: DateTime<Utc>,
    /// Session token for subsequent requests.
    pub token: String,
    /// Whether the account is active.
    pub is_active: bool,
}

impl From<&UserRecord> for SignUpResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            created: user.created,
            last_login: user.last_login,
            token: user.token.clone(),
            is_active: user.is_active,
        }
    }
}

/// Full profile returned by `GET /login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    /// Freshly rotated session token.
    pub token: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    /// Stored password hash, never the plaintext.
    pub password: String,
    pub phones: Vec<PhoneDto>,
}

impl From<&UserRecord> for ProfileResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            created: user.created,
            last_login: user.last_login,
            token: user.token.clone(),
            is_active: user.is_active,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            phones: user.phones.iter().map(PhoneDto::from).collect(),
        }
    }
}

impl From<&Phone> for PhoneDto {
    fn from(phone: &Phone) -> Self {
        Self {
            id: Some(phone.id),
            number: phone.number,
            city_code: phone.city_code,
            country_code: phone.country_code.clone(),
        }
    }
}

impl From<PhoneDto> for Phone {
    fn from(dto: PhoneDto) -> Self {
        Self {
            id: dto.id.unwrap_or_else(Uuid::new_v4),
            number: dto.number,
            city_code: dto.city_code,
            country_code: dto.country_code,
        }
    }
}
