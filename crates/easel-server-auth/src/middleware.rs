// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization policies built on [`TokenValidator`].
//!
//! This module provides:
//! - [`extract_bearer_token`] - pull the credential out of request headers
//! - [`require_auth`] - mandatory authentication
//! - [`optional_auth`] - best-effort authentication, anonymous on any failure
//! - [`require_scopes`] - authentication plus scope enforcement
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Extract Bearer → TokenValidator → policy decision
//! ```
//!
//! # Security Notes
//!
//! - Bearer tokens are extracted from the Authorization header
//! - Token values are never logged

use http::header::AUTHORIZATION;
use http::HeaderMap;
use std::collections::BTreeSet;
use tracing::instrument;

use crate::error::AuthError;
use crate::identity::TokenIdentity;
use crate::scopes::missing_scopes;
use crate::validator::TokenValidator;

/// Extract bearer token from the Authorization header.
///
/// Expects the format: `Authorization: Bearer <token>`
///
/// # Returns
///
/// The bearer token value if found, or `None` if not present or malformed.
#[instrument(level = "trace", skip_all, fields(has_auth_header))]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

/// Mandatory authentication.
///
/// Fails with `Unauthorized` when no usable credential is present; any
/// validator failure propagates unchanged. There is no fallback path.
pub async fn require_auth(
	headers: &HeaderMap,
	validator: &TokenValidator,
) -> Result<TokenIdentity, AuthError> {
	let token = extract_bearer_token(headers)
		.filter(|t| !t.is_empty())
		.ok_or_else(|| AuthError::Unauthorized("missing bearer credential".to_string()))?;

	validator.validate(&token).await
}

/// Optional authentication.
///
/// No credential yields `None`. A present credential yields `Some(identity)`
/// on success and `None` on ANY validator failure, including
/// `ServiceUnavailable`: an auth service outage downgrades the caller to
/// anonymous instead of failing the request. That conflation is deliberate
/// and relied upon; do not fail the request here.
pub async fn optional_auth(headers: &HeaderMap, validator: &TokenValidator) -> Option<TokenIdentity> {
	let token = extract_bearer_token(headers).filter(|t| !t.is_empty())?;

	match validator.validate(&token).await {
		Ok(identity) => Some(identity),
		Err(e) => {
			tracing::debug!(error = %e, "credential present but unusable, treating as anonymous");
			None
		}
	}
}

/// Authentication plus scope enforcement.
///
/// Runs [`require_auth`], then fails with `Forbidden` naming the missing
/// scopes (sorted) when the granted set does not cover the requirement.
/// On success the identity is returned unchanged.
pub async fn require_scopes(
	headers: &HeaderMap,
	validator: &TokenValidator,
	required: &[&str],
) -> Result<TokenIdentity, AuthError> {
	let identity = require_auth(headers, validator).await?;

	let required: BTreeSet<String> = required.iter().map(|s| (*s).to_string()).collect();
	let missing = missing_scopes(&required, &identity.scopes);

	if !missing.is_empty() {
		return Err(AuthError::Forbidden(format!(
			"missing required scopes: {}",
			missing.join(", ")
		)));
	}

	Ok(identity)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validator::ValidatorConfig;
	use http::header::HeaderValue;
	use std::path::PathBuf;
	use std::time::Duration;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn bearer_headers(token: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(
			AUTHORIZATION,
			HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
		);
		headers
	}

	fn unreachable_validator() -> TokenValidator {
		TokenValidator::new(ValidatorConfig {
			base_url: "http://127.0.0.1:9".to_string(),
			trust_anchor_path: PathBuf::from("/nonexistent/ca.crt"),
			timeout: Duration::from_millis(500),
		})
	}

	async fn validator_granting(server: &MockServer, scopes: &[&str]) -> TokenValidator {
		Mock::given(method("POST"))
			.and(path("/auth/token/validate"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"valid": true,
				"user_id": "user-42",
				"scopes": scopes
			})))
			.mount(server)
			.await;

		TokenValidator::new(ValidatorConfig {
			base_url: server.uri(),
			trust_anchor_path: PathBuf::from("/nonexistent/ca.crt"),
			timeout: Duration::from_millis(500),
		})
	}

	mod extract_bearer_token {
		use super::*;

		#[test]
		fn extracts_bearer_token() {
			let headers = bearer_headers("tok-123");
			assert_eq!(extract_bearer_token(&headers), Some("tok-123".to_string()));
		}

		#[test]
		fn returns_none_when_no_auth_header() {
			let headers = HeaderMap::new();
			assert_eq!(extract_bearer_token(&headers), None);
		}

		#[test]
		fn returns_none_for_basic_auth() {
			let mut headers = HeaderMap::new();
			headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
			assert_eq!(extract_bearer_token(&headers), None);
		}

		#[test]
		fn is_case_sensitive_for_bearer_prefix() {
			let mut headers = HeaderMap::new();
			headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer token123"));
			assert_eq!(extract_bearer_token(&headers), None);
		}
	}

	mod require_auth {
		use super::*;

		#[tokio::test]
		async fn missing_credential_is_unauthorized() {
			let validator = unreachable_validator();
			let err = require_auth(&HeaderMap::new(), &validator).await.unwrap_err();
			assert!(matches!(err, AuthError::Unauthorized(_)));
		}

		#[tokio::test]
		async fn empty_credential_is_unauthorized() {
			let validator = unreachable_validator();
			let mut headers = HeaderMap::new();
			headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));

			let err = require_auth(&headers, &validator).await.unwrap_err();
			assert!(matches!(err, AuthError::Unauthorized(_)));
		}

		#[tokio::test]
		async fn unreachable_auth_service_propagates_unavailable() {
			let validator = unreachable_validator();
			let err = require_auth(&bearer_headers("tok"), &validator)
				.await
				.unwrap_err();
			assert!(matches!(err, AuthError::ServiceUnavailable(_)));
		}

		#[tokio::test]
		async fn valid_credential_returns_identity() {
			let server = MockServer::start().await;
			let validator = validator_granting(&server, &["read"]).await;

			let identity = require_auth(&bearer_headers("tok"), &validator)
				.await
				.unwrap();
			assert_eq!(identity.subject_id, "user-42");
		}
	}

	mod optional_auth {
		use super::*;

		#[tokio::test]
		async fn no_credential_is_anonymous() {
			let validator = unreachable_validator();
			assert!(optional_auth(&HeaderMap::new(), &validator).await.is_none());
		}

		#[tokio::test]
		async fn unreachable_auth_service_is_anonymous_not_an_error() {
			// Same input that makes require_auth fail with ServiceUnavailable.
			let validator = unreachable_validator();
			assert!(
				optional_auth(&bearer_headers("tok"), &validator)
					.await
					.is_none()
			);
		}

		#[tokio::test]
		async fn rejected_credential_is_anonymous() {
			let server = MockServer::start().await;
			Mock::given(method("POST"))
				.and(path("/auth/token/validate"))
				.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
					"valid": false,
					"message": "Invalid token"
				})))
				.mount(&server)
				.await;

			let validator = TokenValidator::new(ValidatorConfig {
				base_url: server.uri(),
				trust_anchor_path: PathBuf::from("/nonexistent/ca.crt"),
				timeout: Duration::from_millis(500),
			});

			assert!(
				optional_auth(&bearer_headers("bad"), &validator)
					.await
					.is_none()
			);
		}

		#[tokio::test]
		async fn valid_credential_yields_identity() {
			let server = MockServer::start().await;
			let validator = validator_granting(&server, &[]).await;

			let identity = optional_auth(&bearer_headers("tok"), &validator)
				.await
				.unwrap();
			assert_eq!(identity.subject_id, "user-42");
		}
	}

	mod require_scopes {
		use super::*;

		#[tokio::test]
		async fn partial_grant_is_forbidden_naming_missing() {
			let server = MockServer::start().await;
			let validator = validator_granting(&server, &["a"]).await;

			let err = require_scopes(&bearer_headers("tok"), &validator, &["a", "b"])
				.await
				.unwrap_err();

			match err {
				AuthError::Forbidden(reason) => {
					assert!(reason.contains("b"));
					assert!(!reason.contains("a,"));
					assert_eq!(reason, "missing required scopes: b");
				}
				other => panic!("expected Forbidden, got {other:?}"),
			}
		}

		#[tokio::test]
		async fn full_grant_returns_identity_unchanged() {
			let server = MockServer::start().await;
			let validator = validator_granting(&server, &["a", "b"]).await;

			let identity = require_scopes(&bearer_headers("tok"), &validator, &["a", "b"])
				.await
				.unwrap();
			assert_eq!(identity.subject_id, "user-42");
			assert!(identity.has_scope("a"));
		}

		#[tokio::test]
		async fn admin_scope_scenario() {
			let server = MockServer::start().await;
			let validator = validator_granting(&server, &["admin"]).await;

			let identity = require_scopes(&bearer_headers("tok"), &validator, &["admin"])
				.await
				.unwrap();
			assert_eq!(identity.subject_id, "user-42");
		}

		#[tokio::test]
		async fn empty_grant_never_satisfies_requirement() {
			let server = MockServer::start().await;
			let validator = validator_granting(&server, &[]).await;

			let err = require_scopes(&bearer_headers("tok"), &validator, &["admin"])
				.await
				.unwrap_err();
			assert!(matches!(err, AuthError::Forbidden(_)));
		}

		#[tokio::test]
		async fn missing_credential_fails_before_scope_check() {
			let validator = unreachable_validator();
			let err = require_scopes(&HeaderMap::new(), &validator, &["admin"])
				.await
				.unwrap_err();
			assert!(matches!(err, AuthError::Unauthorized(_)));
		}
	}
}
