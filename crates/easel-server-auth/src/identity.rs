// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The identity asserted by a validated bearer token.
///
/// Produced only by [`crate::TokenValidator::validate`]; immutable for the
/// lifetime of one request. Scopes are an ordered set so that any report of
/// missing scopes is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenIdentity {
	/// Subject identifier assigned by the auth service.
	pub subject_id: String,
	/// Email on record with the auth service, if any.
	pub email: Option<String>,
	/// Capability scopes granted to the token. Absent upstream means empty.
	pub scopes: BTreeSet<String>,
	/// Token expiry as reported by the auth service.
	pub expires_at: Option<DateTime<Utc>>,
}

impl TokenIdentity {
	/// Returns true if the token carries the given scope.
	pub fn has_scope(&self, scope: &str) -> bool {
		self.scopes.contains(scope)
	}
}
