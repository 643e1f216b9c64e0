// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Dashboard HTTP handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use easel_server_db::{Dashboard, NewDashboard, ProvisioningState};

use crate::api::AppState;
use crate::auth_middleware::RequireAuth;
use crate::error::ServerError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDashboardRequest {
	pub title: String,
	pub description: Option<String>,
	pub owner_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
	pub id: i64,
	pub title: String,
	pub description: Option<String>,
	pub canvas_id: String,
	pub owner_id: i64,
	pub provisioning: ProvisioningState,
}

impl From<Dashboard> for DashboardResponse {
	fn from(dashboard: Dashboard) -> Self {
		Self {
			id: dashboard.id,
			title: dashboard.title,
			description: dashboard.description,
			canvas_id: dashboard.canvas_id,
			owner_id: dashboard.owner_id,
			provisioning: dashboard.provisioning,
		}
	}
}

/// POST /dashboards - Create a dashboard and trigger canvas provisioning.
///
/// A successful response means the dashboard row is committed with its
/// canvas id assigned. It does NOT mean the canvas will be provisioned:
/// when the broker is down the record comes back with
/// `provisioning = "skipped"` and an external reconciler picks it up.
pub async fn create_dashboard(
	State(state): State<AppState>,
	RequireAuth(identity): RequireAuth,
	Json(request): Json<CreateDashboardRequest>,
) -> Result<Json<DashboardResponse>, ServerError> {
	if request.title.trim().is_empty() {
		return Err(ServerError::BadRequest("title must not be empty".to_string()));
	}

	if state.users.get(request.owner_id).await?.is_none() {
		return Err(ServerError::NotFound(format!("user {}", request.owner_id)));
	}

	tracing::info!(
		subject = %identity.subject_id,
		owner_id = request.owner_id,
		"dashboard creation requested"
	);

	let dashboard = state
		.provisioner
		.create_dashboard(
			request.owner_id,
			&NewDashboard {
				title: request.title,
				description: request.description,
			},
		)
		.await?;

	Ok(Json(dashboard.into()))
}
