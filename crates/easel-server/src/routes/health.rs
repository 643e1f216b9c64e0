// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health and banner HTTP handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::auth_middleware::OptionalAuth;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
	pub message: String,
	pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub service: String,
	pub database: String,
}

/// GET / - Service banner.
///
/// Authentication is optional here: a usable credential personalizes the
/// banner, anything else (including an auth service outage) falls back to
/// the anonymous greeting rather than failing the request.
pub async fn root(OptionalAuth(identity): OptionalAuth) -> impl IntoResponse {
	let message = match &identity {
		Some(identity) => {
			let who = identity.email.as_deref().unwrap_or(&identity.subject_id);
			format!("easel user service is running, hello {who}")
		}
		None => "easel user service is running".to_string(),
	};

	Json(RootResponse {
		message,
		version: env!("CARGO_PKG_VERSION").to_string(),
	})
}

/// GET /health - Liveness check including database connectivity.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
		Ok(_) => "healthy",
		Err(e) => {
			tracing::error!(error = %e, "database health check failed");
			"unhealthy"
		}
	};

	let status = if database == "healthy" {
		"healthy"
	} else {
		"unhealthy"
	};

	let http_status = if status == "healthy" {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};

	(
		http_status,
		Json(HealthResponse {
			status: status.to_string(),
			service: "easel-server".to_string(),
			database: database.to_string(),
		}),
	)
}
