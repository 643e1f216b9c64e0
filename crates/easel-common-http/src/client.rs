// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Certificate, Client, ClientBuilder};
use std::path::{Path, PathBuf};

/// Error loading a configured trust anchor.
#[derive(Debug, thiserror::Error)]
pub enum TrustAnchorError {
	#[error("failed to read trust anchor {path}: {source}")]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},

	#[error("invalid trust anchor {path}: {source}")]
	Parse {
		path: PathBuf,
		source: reqwest::Error,
	},
}

/// Creates a new HTTP client builder with the standard easel User-Agent header.
///
/// Use this when you need to customize the client (e.g., set timeout or add
/// a root certificate).
///
/// # Example
/// ```ignore
/// let client = easel_common_http::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Loads a PEM root certificate to pin an internal service's identity.
///
/// Returns `Ok(None)` when the file does not exist, in which case callers
/// fall back to the platform default trust store.
pub fn load_root_certificate(path: &Path) -> Result<Option<Certificate>, TrustAnchorError> {
	if !path.exists() {
		return Ok(None);
	}

	let pem = std::fs::read(path).map_err(|source| TrustAnchorError::Read {
		path: path.to_path_buf(),
		source,
	})?;

	let cert = Certificate::from_pem(&pem).map_err(|source| TrustAnchorError::Parse {
		path: path.to_path_buf(),
		source,
	})?;

	Ok(Some(cert))
}

/// Returns the standard easel User-Agent string.
///
/// Format: `easel/{version}`
pub fn user_agent() -> String {
	format!("easel/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use std::time::Duration;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("easel/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 2);
		assert_eq!(parts[0], "easel");
	}

	#[test]
	fn builder_with_timeout_builds() {
		let client = builder().timeout(Duration::from_secs(5)).build();
		assert!(client.is_ok());
	}

	#[test]
	fn missing_trust_anchor_falls_back_to_platform_store() {
		let result = load_root_certificate(Path::new("/nonexistent/ca.crt")).unwrap();
		assert!(result.is_none());
	}

	#[test]
	fn garbage_trust_anchor_is_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(b"not a certificate").unwrap();

		let result = load_root_certificate(file.path());
		assert!(matches!(result, Err(TrustAnchorError::Parse { .. })));
	}
}
