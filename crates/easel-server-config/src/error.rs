// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid value for {key}: {reason}")]
	Invalid { key: String, reason: String },

	#[error("configuration validation failed: {0}")]
	Validation(String),
}
