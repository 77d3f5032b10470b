// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{middleware, policy},
    error::ErrorDetail,
    models::{PhoneDto, ProfileResponse, SignUpRequest, SignUpResponse},
    state::AppState,
};

pub mod users;

/// Build the application router.
///
/// The authentication interceptor runs first on every request (outermost
/// of the two auth layers), then the policy gate; both also cover unknown
/// paths, so anything but the public routes answers 401 without a token.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sign-up", post(users::sign_up))
        .route("/login", get(users::login))
        .with_state(state.clone());

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(state.clone(), policy::enforce))
        .layer(from_fn_with_state(state, middleware::authenticate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(users::sign_up, users::login),
    components(schemas(
        SignUpRequest,
        SignUpResponse,
        ProfileResponse,
        PhoneDto,
        ErrorDetail
    )),
    tags(
        (name = "Users", description = "Account registration and token-based login")
    )
)]
struct ApiDoc;
