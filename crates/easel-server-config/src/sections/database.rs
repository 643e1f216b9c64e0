// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database configuration.

use crate::env::env_string;
use crate::error::ConfigError;

/// Database configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	pub url: String,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: "sqlite:./easel.db".to_string(),
		}
	}
}

impl DatabaseConfig {
	/// Load from `EASEL_SERVER_DATABASE_URL`, falling back to the default.
	pub fn from_env() -> Result<Self, ConfigError> {
		Ok(Self {
			url: env_string("EASEL_SERVER_DATABASE_URL").unwrap_or_else(|| Self::default().url),
		})
	}
}
