// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound token validation against the central auth service.
//!
//! The validator owns one shared HTTP client for its whole lifetime. The
//! client is built on first use behind a [`tokio::sync::OnceCell`], so
//! concurrent first callers race to a single construction, and it is
//! released explicitly on shutdown.
//!
//! # Security Notes
//!
//! - Token values are never logged; tracing fields carry only presence.
//! - The auth service's TLS identity is pinned to the configured trust
//!   anchor when the file exists, otherwise the platform store is used.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::instrument;

use crate::error::AuthError;
use crate::identity::TokenIdentity;

/// Configuration for the token validator.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
	/// Base URL of the auth service.
	pub base_url: String,
	/// PEM trust anchor pinning the auth service's TLS identity.
	pub trust_anchor_path: PathBuf,
	/// Bound applied to each validation call.
	pub timeout: Duration,
}

impl Default for ValidatorConfig {
	fn default() -> Self {
		Self {
			base_url: "https://auth-service:8443".to_string(),
			trust_anchor_path: PathBuf::from("/etc/ssl/certs/ca.crt"),
			timeout: Duration::from_secs(5),
		}
	}
}

/// Wire format of the auth service's validation response.
#[derive(Debug, Deserialize)]
struct ValidateResponse {
	valid: bool,
	#[serde(default)]
	user_id: Option<String>,
	#[serde(default)]
	email: Option<String>,
	#[serde(default)]
	scopes: Option<Vec<String>>,
	#[serde(default)]
	expires_at: Option<DateTime<Utc>>,
	#[serde(default)]
	message: Option<String>,
}

/// Validates bearer tokens against the central auth service.
pub struct TokenValidator {
	config: ValidatorConfig,
	client: OnceCell<reqwest::Client>,
}

impl TokenValidator {
	pub fn new(config: ValidatorConfig) -> Self {
		Self {
			config,
			client: OnceCell::new(),
		}
	}

	/// Get or build the shared HTTP client.
	///
	/// `get_or_try_init` serializes concurrent first callers, so exactly one
	/// client is ever constructed.
	async fn client(&self) -> Result<&reqwest::Client, AuthError> {
		self
			.client
			.get_or_try_init(|| async {
				let mut builder = easel_common_http::builder().timeout(self.config.timeout);

				match easel_common_http::load_root_certificate(&self.config.trust_anchor_path) {
					Ok(Some(cert)) => builder = builder.add_root_certificate(cert),
					Ok(None) => {}
					Err(e) => {
						return Err(AuthError::ServiceUnavailable(format!(
							"cannot pin auth service identity: {e}"
						)))
					}
				}

				builder
					.build()
					.map_err(|e| AuthError::ServiceUnavailable(format!("failed to build auth client: {e}")))
			})
			.await
	}

	/// Validate a bearer token against the auth service.
	///
	/// A timeout or connection failure yields `ServiceUnavailable`, never
	/// `Unauthorized`: only the auth service's own judgement of the
	/// credential produces `Unauthorized`.
	#[instrument(level = "debug", skip_all)]
	pub async fn validate(&self, credential: &str) -> Result<TokenIdentity, AuthError> {
		let client = self.client().await?;
		let url = format!(
			"{}/auth/token/validate",
			self.config.base_url.trim_end_matches('/')
		);

		let response = client
			.post(&url)
			.bearer_auth(credential)
			.send()
			.await
			.map_err(classify_transport_error)?;

		if !response.status().is_success() {
			return Err(AuthError::Unauthorized("token validation failed".to_string()));
		}

		let payload: ValidateResponse = response
			.json()
			.await
			.map_err(|e| AuthError::ServiceUnavailable(format!("malformed validation response: {e}")))?;

		if !payload.valid {
			return Err(AuthError::Unauthorized(
				payload.message.unwrap_or_else(|| "invalid token".to_string()),
			));
		}

		let subject_id = payload.user_id.ok_or_else(|| {
			AuthError::ServiceUnavailable("validation response carried no subject".to_string())
		})?;

		// Absent scopes mean no scopes, not all scopes.
		let scopes: BTreeSet<String> = payload.scopes.unwrap_or_default().into_iter().collect();

		Ok(TokenIdentity {
			subject_id,
			email: payload.email,
			scopes,
			expires_at: payload.expires_at,
		})
	}

	/// Release the outbound client. Call on server shutdown.
	pub fn shutdown(&mut self) {
		if self.client.take().is_some() {
			tracing::debug!("released auth service client");
		}
	}
}

/// Map a transport-level failure onto the dependency-unavailable category.
fn classify_transport_error(e: reqwest::Error) -> AuthError {
	if e.is_timeout() {
		AuthError::ServiceUnavailable("auth service timeout".to_string())
	} else {
		AuthError::ServiceUnavailable(format!("auth service unreachable: {e}"))
	}
}
