// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment variable helpers shared by the config sections.

use crate::error::ConfigError;

/// Read a string variable; empty or whitespace-only values count as unset.
pub(crate) fn env_string(key: &str) -> Option<String> {
	match std::env::var(key) {
		Ok(value) => {
			let trimmed = value.trim();
			if trimmed.is_empty() {
				None
			} else {
				Some(trimmed.to_string())
			}
		}
		Err(_) => None,
	}
}

/// Read and parse a variable, surfacing parse failures with the offending key.
pub(crate) fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	match env_string(key) {
		Some(raw) => raw
			.parse()
			.map(Some)
			.map_err(|e: T::Err| ConfigError::Invalid {
				key: key.to_string(),
				reason: e.to_string(),
			}),
		None => Ok(None),
	}
}
