// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: registration and login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::AuthorizationHeader,
    error::ApiError,
    models::{ProfileResponse, SignUpRequest, SignUpResponse},
    state::AppState,
    storage::{UserDbError, UserRecord},
};

/// Hash a plaintext password into an Argon2id PHC string.
fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| ApiError::internal("Internal error: something went wrong"))
}

/// Register a new account.
///
/// Public: the only operation reachable without a token. Validation
/// failures are aggregated, one entry per invalid field. The response
/// carries the initial session token and omits email, password, and
/// phones.
#[utoipa::path(
    post,
    path = "/sign-up",
    tag = "Users",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = SignUpResponse),
        (status = 400, description = "Validation failure or duplicate email"),
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    request.validate().map_err(ApiError::validation)?;

    let password_hash = hash_password(&request.password)?;
    let token = state
        .credentials
        .issue_on_registration(&request.email)
        .map_err(|_| ApiError::internal("Internal error: something went wrong"))?;

    let now = Utc::now();
    let user = UserRecord {
        id: Uuid::new_v4(),
        email: request.email,
        password_hash,
        name: request.name,
        phones: request.phones.into_iter().map(Into::into).collect(),
        token,
        is_active: true,
        created: now,
        last_login: now,
    };

    state.db.create_user(&user).map_err(|e| match e {
        UserDbError::AlreadyExists(_) => ApiError::bad_request("User already registered"),
        other => {
            tracing::error!(error = %other, "failed to persist new user");
            ApiError::internal("Internal error: something went wrong")
        }
    })?;

    Ok((StatusCode::CREATED, Json(SignUpResponse::from(&user))))
}

/// Log in with the session token from sign-up or a previous login.
///
/// The subject encoded in the presented token names the account; an
/// invalid credential and an unknown account are treated identically at
/// this boundary. On success the token is rotated, `last_login` is
/// bumped, and the full profile is returned.
#[utoipa::path(
    get,
    path = "/login",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Full profile with rotated token", body = ProfileResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "No account for the token's subject"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AuthorizationHeader(authorization): AuthorizationHeader,
) -> Result<Json<ProfileResponse>, ApiError> {
    let grant = state
        .credentials
        .login(&authorization)
        .map_err(|_| ApiError::not_found("User not found"))?;

    let mut user = state.db.get_by_email(&grant.subject).map_err(|e| match e {
        UserDbError::NotFound(_) => ApiError::not_found("User not found"),
        other => {
            tracing::error!(error = %other, "user lookup failed");
            ApiError::internal("Internal error: something went wrong")
        }
    })?;

    user.last_login = Utc::now();
    user.token = grant.token;

    state.db.update_user(&user).map_err(|e| {
        tracing::error!(error = %e, "failed to persist rotated token");
        ApiError::internal("Internal error: something went wrong")
    })?;

    Ok(Json(ProfileResponse::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenCodec;
    use crate::models::PhoneDto;
    use crate::storage::UserDatabase;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let db =
            UserDatabase::open(&dir.path().join("users.redb")).expect("open database");
        let codec = TokenCodec::new(b"test-secret-key-for-testing-only", 60_000);
        (AppState::new(db, codec), dir)
    }

    fn sign_up_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: "Passw0rd12".to_string(),
            name: Some("Ada".to_string()),
            phones: vec![PhoneDto {
                id: None,
                number: 87654321,
                city_code: 11,
                country_code: "54".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn sign_up_creates_account_with_token() {
        let (state, _dir) = test_state();

        let (status, Json(response)) =
            sign_up(State(state.clone()), Json(sign_up_request("a@example.com")))
                .await
                .expect("sign-up succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert!(response.is_active);
        assert_eq!(response.created, response.last_login);
        assert_eq!(
            state.tokens.verify(&response.token).unwrap(),
            "a@example.com"
        );

        // The record is durably stored with the same token
        let stored = state.db.get_by_email("a@example.com").unwrap();
        assert_eq!(stored.token, response.token);
        assert_ne!(stored.password_hash, "Passw0rd12");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let (state, _dir) = test_state();

        sign_up(State(state.clone()), Json(sign_up_request("dup@x.com")))
            .await
            .expect("first sign-up succeeds");

        let err = sign_up(State(state.clone()), Json(sign_up_request("dup@x.com")))
            .await
            .expect_err("second sign-up fails");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.errors[0].detail, "User already registered");
    }

    #[tokio::test]
    async fn sign_up_aggregates_validation_errors() {
        let (state, _dir) = test_state();

        let mut request = sign_up_request("a@example.com");
        request.email = "not-an-email".to_string();
        request.password = "weak".to_string();

        let err = sign_up(State(state), Json(request))
            .await
            .expect_err("validation fails");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.errors.len(), 2);
    }

    #[tokio::test]
    async fn login_rotates_token_and_returns_profile() {
        let (state, _dir) = test_state();

        let (_, Json(created)) =
            sign_up(State(state.clone()), Json(sign_up_request("a@example.com")))
                .await
                .unwrap();

        let Json(profile) = login(
            State(state.clone()),
            AuthorizationHeader(format!("Bearer {}", created.token)),
        )
        .await
        .expect("login succeeds");

        assert_eq!(profile.email, "a@example.com");
        assert_ne!(profile.token, created.token, "token must be rotated");
        assert_eq!(
            state.tokens.verify(&profile.token).unwrap(),
            "a@example.com"
        );
        assert!(profile.last_login >= created.last_login);
        assert_eq!(profile.phones.len(), 1);

        // Rotation is persisted
        let stored = state.db.get_by_email("a@example.com").unwrap();
        assert_eq!(stored.token, profile.token);
    }

    #[tokio::test]
    async fn login_with_unknown_subject_is_not_found() {
        let (state, _dir) = test_state();

        // Correctly signed token for an email that was never registered
        let token = state.tokens.issue("ghost@example.com").unwrap();
        let err = login(State(state), AuthorizationHeader(format!("Bearer {token}")))
            .await
            .expect_err("login fails");

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.errors[0].detail, "User not found");
    }

    #[tokio::test]
    async fn login_with_invalid_token_is_not_found() {
        let (state, _dir) = test_state();

        let err = login(
            State(state),
            AuthorizationHeader("Bearer garbage".to_string()),
        )
        .await
        .expect_err("login fails");

        // Invalid credential and unknown account are indistinguishable here
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
