// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! API error responses.
//!
//! Every use-case error surfaces to the client as a structured payload:
//!
//! ```json
//! {"error": [{"timestamp": "...", "code": 400, "detail": "..."}]}
//! ```
//!
//! Validation failures aggregate one entry per invalid field; everything
//! else carries a single entry.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One entry in the client-facing error payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Numeric HTTP status code.
    pub code: u16,
    /// Human-readable description.
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub errors: Vec<ErrorDetail>,
}

#[derive(Serialize, ToSchema)]
struct ErrorBody {
    error: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            errors: vec![ErrorDetail {
                timestamp: Utc::now(),
                code: status.as_u16(),
                detail: detail.into(),
            }],
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Aggregate field validation failures into one 400 response,
    /// one entry per invalid field.
    pub fn validation(details: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            status: StatusCode::BAD_REQUEST,
            errors: details
                .into_iter()
                .map(|detail| ErrorDetail {
                    timestamp: now,
                    code: StatusCode::BAD_REQUEST.as_u16(),
                    detail,
                })
                .collect(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody { error: self.errors });
        (self.status, body).into_response()
    }
}
