// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! External auth service (token validation authority) configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::env::{env_parse, env_string};
use crate::error::ConfigError;

/// Auth service configuration (runtime, fully resolved).
///
/// The trust anchor pins the auth service's TLS identity; when the file is
/// absent the platform default trust store is used instead.
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
	pub base_url: String,
	pub trust_anchor_path: PathBuf,
	pub validate_timeout_secs: u64,
}

impl Default for AuthorityConfig {
	fn default() -> Self {
		Self {
			base_url: "https://auth-service:8443".to_string(),
			trust_anchor_path: PathBuf::from("/etc/ssl/certs/ca.crt"),
			validate_timeout_secs: 5,
		}
	}
}

impl AuthorityConfig {
	/// Load from `EASEL_SERVER_AUTHORITY_*`, falling back to defaults.
	pub fn from_env() -> Result<Self, ConfigError> {
		let defaults = Self::default();
		Ok(Self {
			base_url: env_string("EASEL_SERVER_AUTHORITY_URL").unwrap_or(defaults.base_url),
			trust_anchor_path: env_string("EASEL_SERVER_AUTHORITY_CA_PATH")
				.map(PathBuf::from)
				.unwrap_or(defaults.trust_anchor_path),
			validate_timeout_secs: env_parse("EASEL_SERVER_AUTHORITY_TIMEOUT_SECS")?
				.unwrap_or(defaults.validate_timeout_secs),
		})
	}

	/// Bound applied to each outbound validation call.
	pub fn validate_timeout(&self) -> Duration {
		Duration::from_secs(self.validate_timeout_secs)
	}
}
