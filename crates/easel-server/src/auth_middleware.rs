// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Axum extractors wrapping the authorization policies.
//!
//! Handlers declare the policy they need as an argument:
//!
//! ```ignore
//! async fn handler(RequireAuth(identity): RequireAuth) { ... }
//! async fn handler(OptionalAuth(identity): OptionalAuth) { ... }
//! async fn handler(RequireAdmin(identity): RequireAdmin) { ... }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use easel_server_auth::{optional_auth, require_auth, require_scopes, TokenIdentity};

use crate::api::AppState;
use crate::error::ServerError;

/// Scopes required for destructive administrative operations.
const ADMIN_SCOPES: &[&str] = &["admin"];

/// Mandatory authentication. Rejects the request when the credential is
/// missing, rejected, or the auth service cannot be reached.
pub struct RequireAuth(pub TokenIdentity);

impl FromRequestParts<AppState> for RequireAuth {
	type Rejection = ServerError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let identity = require_auth(&parts.headers, &state.validator).await?;
		Ok(RequireAuth(identity))
	}
}

/// Best-effort authentication. Never rejects: any failure, including an
/// auth service outage, yields an anonymous request.
pub struct OptionalAuth(pub Option<TokenIdentity>);

impl FromRequestParts<AppState> for OptionalAuth {
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let identity = optional_auth(&parts.headers, &state.validator).await;
		Ok(OptionalAuth(identity))
	}
}

/// Authentication plus the `admin` scope.
pub struct RequireAdmin(pub TokenIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
	type Rejection = ServerError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let identity = require_scopes(&parts.headers, &state.validator, ADMIN_SCOPES).await?;
		Ok(RequireAdmin(identity))
	}
}
