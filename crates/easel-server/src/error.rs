// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-wide error type and its HTTP mapping.
//!
//! Auth failures map to distinct client-facing categories: a credential
//! problem (401), an authorization problem (403), and a dependency problem
//! (503). Broker failures never appear here at all; the provisioner absorbs
//! them before a handler returns.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use easel_server_auth::AuthError;
use easel_server_db::DbError;

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error(transparent)]
	Auth(#[from] AuthError),

	#[error(transparent)]
	Db(#[from] DbError),

	#[error("{0}")]
	BadRequest(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("internal error: {0}")]
	Internal(String),
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error, message) = match &self {
			ServerError::Auth(AuthError::Unauthorized(reason)) => {
				(StatusCode::UNAUTHORIZED, "unauthorized", reason.clone())
			}
			ServerError::Auth(AuthError::Forbidden(reason)) => {
				(StatusCode::FORBIDDEN, "forbidden", reason.clone())
			}
			ServerError::Auth(AuthError::ServiceUnavailable(reason)) => (
				StatusCode::SERVICE_UNAVAILABLE,
				"auth_service_unavailable",
				reason.clone(),
			),
			ServerError::Db(DbError::NotFound(what)) => {
				(StatusCode::NOT_FOUND, "not_found", what.clone())
			}
			ServerError::Db(DbError::Conflict(reason)) => {
				(StatusCode::BAD_REQUEST, "conflict", reason.clone())
			}
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal_error",
					"internal server error".to_string(),
				)
			}
			ServerError::BadRequest(reason) => {
				(StatusCode::BAD_REQUEST, "bad_request", reason.clone())
			}
			ServerError::NotFound(what) => (StatusCode::NOT_FOUND, "not_found", what.clone()),
			ServerError::Internal(e) => {
				tracing::error!(error = %e, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal_error",
					"internal server error".to_string(),
				)
			}
		};

		let body = Json(ErrorResponse {
			error: error.to_string(),
			message,
		});

		if status == StatusCode::UNAUTHORIZED {
			(status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
		} else {
			(status, body).into_response()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unauthorized_carries_www_authenticate() {
		let response =
			ServerError::Auth(AuthError::Unauthorized("missing bearer credential".to_string()))
				.into_response();

		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(
			response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
			"Bearer"
		);
	}

	#[test]
	fn auth_outage_maps_to_service_unavailable() {
		let response = ServerError::Auth(AuthError::ServiceUnavailable(
			"auth service timeout".to_string(),
		))
		.into_response();

		assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
	}

	#[test]
	fn forbidden_maps_to_403() {
		let response =
			ServerError::Auth(AuthError::Forbidden("missing required scopes: admin".to_string()))
				.into_response();

		assert_eq!(response.status(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn db_internal_details_are_not_leaked() {
		let response =
			ServerError::Db(DbError::Internal("connection pool exploded".to_string())).into_response();

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
