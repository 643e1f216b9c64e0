// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for authentication and authorization.

use thiserror::Error;

/// Why a request could not be authenticated or authorized.
///
/// `Unauthorized` and `ServiceUnavailable` are deliberately distinct:
/// the first means the credential was judged bad, the second means the
/// auth service could not be asked. Callers decide retry policy on that
/// distinction, so the two must never be collapsed.
#[derive(Debug, Error)]
pub enum AuthError {
	/// Credential missing, malformed, expired, or rejected by the auth service.
	#[error("unauthorized: {0}")]
	Unauthorized(String),

	/// Credential valid but lacking required scopes.
	#[error("forbidden: {0}")]
	Forbidden(String),

	/// Auth service unreachable or timed out.
	#[error("auth service unavailable: {0}")]
	ServiceUnavailable(String),
}

/// Result type alias for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
