// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bearer token validation and authorization policies for easel.
//!
//! Authentication is delegated to a central auth service: this crate owns
//! the outbound validation call and the policies routes compose on top of
//! it (mandatory auth, optional auth, scope-gated auth), plus the password
//! hashing used at registration and login.
//!
//! The error taxonomy distinguishes a rejected credential (`Unauthorized`)
//! from an unreachable auth service (`ServiceUnavailable`); routes map
//! these to distinct client-facing status codes so callers can tell "fix
//! your token" apart from "retry later".

pub mod error;
pub mod identity;
pub mod middleware;
pub mod password;
pub mod scopes;
pub mod validator;

pub use error::AuthError;
pub use identity::TokenIdentity;
pub use middleware::{extract_bearer_token, optional_auth, require_auth, require_scopes};
pub use password::{hash_password, verify_password, PasswordHashError};
pub use scopes::missing_scopes;
pub use validator::{TokenValidator, ValidatorConfig};
