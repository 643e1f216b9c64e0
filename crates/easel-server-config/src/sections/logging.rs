// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration.

use crate::env::env_string;
use crate::error::ConfigError;

/// Logging configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
	/// Default tracing filter directive, overridable via `RUST_LOG`.
	pub level: String,
	/// Emit logs as JSON lines instead of human-readable text.
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			json: true,
		}
	}
}

impl LoggingConfig {
	/// Load from `EASEL_SERVER_LOG_LEVEL` / `EASEL_SERVER_LOG_FORMAT`,
	/// falling back to defaults.
	pub fn from_env() -> Result<Self, ConfigError> {
		let defaults = Self::default();
		let json = match env_string("EASEL_SERVER_LOG_FORMAT").as_deref() {
			Some("text") => false,
			Some("json") | None => defaults.json,
			Some(other) => {
				return Err(ConfigError::Invalid {
					key: "EASEL_SERVER_LOG_FORMAT".to_string(),
					reason: format!("expected 'json' or 'text', got '{other}'"),
				})
			}
		};
		Ok(Self {
			level: env_string("EASEL_SERVER_LOG_LEVEL").unwrap_or(defaults.level),
			json,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_json_info() {
		let config = LoggingConfig::default();
		assert_eq!(config.level, "info");
		assert!(config.json);
	}
}
