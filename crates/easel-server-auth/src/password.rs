// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password hashing for user registration and login.
//!
//! Uses Argon2id with production-strength parameters in release builds and
//! fast, reduced-cost parameters in tests. Test parameters MUST NOT be used
//! in production.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
#[cfg(test)]
use argon2::{Algorithm, Params, Version};

/// Error hashing a password.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// Returns an Argon2 instance configured appropriately for the build context.
#[inline]
fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		// Fast, insecure parameters for tests ONLY.
		let params = Params::new(
			1024, // memory_kib: 1 MiB
			1,    // iterations
			1,    // parallelism
			None, // output length = default
		)
		.expect("valid Argon2 params for tests");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		Argon2::default()
	}
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| PasswordHashError(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// An unparseable stored hash counts as a mismatch, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
	let Ok(parsed) = PasswordHash::new(stored_hash) else {
		return false;
	};

	argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_then_verify_round_trips() {
		let hash = hash_password("secret123").unwrap();
		assert!(verify_password("secret123", &hash));
		assert!(!verify_password("wrong", &hash));
	}

	#[test]
	fn hashes_are_salted() {
		let a = hash_password("secret123").unwrap();
		let b = hash_password("secret123").unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn garbage_stored_hash_is_a_mismatch() {
		assert!(!verify_password("secret123", "not-a-phc-string"));
	}
}
