// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! easel user service HTTP server.
//!
//! This crate wires the auth, database, and provisioning crates into an
//! axum application: users register and log in locally, every other route
//! is gated on bearer tokens validated by the central auth service, and
//! dashboard creation hands canvas provisioning to a broker queue after
//! the local commit.

pub mod api;
pub mod auth_middleware;
pub mod error;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use easel_server_config::ServerConfig;
pub use error::{ErrorResponse, ServerError};
