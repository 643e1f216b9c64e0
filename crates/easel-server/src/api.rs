// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;

use easel_server_auth::{TokenValidator, ValidatorConfig};
use easel_server_config::ServerConfig;
use easel_server_db::{DashboardRepository, UserRepository};
use easel_server_provisioning::{CanvasProvisioner, CanvasQueuePublisher};

use crate::routes;

/// Shared state handed to every request handler.
///
/// The validator is the only cross-request shared mutable resource; its
/// inner client initializes once and is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub validator: Arc<TokenValidator>,
	pub users: UserRepository,
	pub dashboards: DashboardRepository,
	pub provisioner: Arc<CanvasProvisioner>,
}

/// Build application state from configuration.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let validator = Arc::new(TokenValidator::new(ValidatorConfig {
		base_url: config.authority.base_url.clone(),
		trust_anchor_path: config.authority.trust_anchor_path.clone(),
		timeout: config.authority.validate_timeout(),
	}));

	let publisher = Arc::new(CanvasQueuePublisher::new(
		config.broker.url.clone(),
		config.broker.queue_name.clone(),
		config.broker.publish_timeout(),
	));

	let dashboards = DashboardRepository::new(pool.clone());
	let provisioner = Arc::new(CanvasProvisioner::new(dashboards.clone(), publisher));

	AppState {
		pool: pool.clone(),
		validator,
		users: UserRepository::new(pool),
		dashboards,
		provisioner,
	}
}

/// Assemble the HTTP router.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::health::root))
		.route("/health", get(routes::health::health_check))
		.route("/users/register", post(routes::users::register))
		.route("/users/login", post(routes::users::login))
		.route("/users", get(routes::users::list_users))
		.route(
			"/users/{id}",
			get(routes::users::get_user)
				.put(routes::users::update_user)
				.delete(routes::users::delete_user),
		)
		.route(
			"/users/{id}/dashboards",
			get(routes::users::list_user_dashboards),
		)
		.route("/dashboards", post(routes::dashboards::create_dashboard))
		.with_state(state)
}
