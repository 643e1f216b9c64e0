// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard records and their canvas provisioning lifecycle.
//!
//! A dashboard's canvas identifier is derived from its own row id, which is
//! only known after the first insert. Creation is therefore two-phase:
//!
//! ```text
//! pending (placeholder canvas_id) → committed (canvas_id = row id)
//!     → requested | skipped  (publish outcome)
//! ```
//!
//! All states after `committed` are terminal for this service; `skipped`
//! rows are left for an external reconciler.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DbError, Result};

/// Where a dashboard sits in the canvas provisioning lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningState {
	Pending,
	Committed,
	Requested,
	Skipped,
}

impl ProvisioningState {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProvisioningState::Pending => "pending",
			ProvisioningState::Committed => "committed",
			ProvisioningState::Requested => "requested",
			ProvisioningState::Skipped => "skipped",
		}
	}
}

impl std::str::FromStr for ProvisioningState {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"pending" => Ok(ProvisioningState::Pending),
			"committed" => Ok(ProvisioningState::Committed),
			"requested" => Ok(ProvisioningState::Requested),
			"skipped" => Ok(ProvisioningState::Skipped),
			_ => Err(format!("unknown provisioning state: {s}")),
		}
	}
}

/// A dashboard owned by a user, backed by an externally provisioned canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
	pub id: i64,
	pub title: String,
	pub description: Option<String>,
	pub canvas_id: String,
	pub owner_id: i64,
	pub provisioning: ProvisioningState,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDashboard {
	pub title: String,
	pub description: Option<String>,
}

type DashboardRow = (
	i64,
	String,
	Option<String>,
	String,
	i64,
	String,
	DateTime<Utc>,
	DateTime<Utc>,
);

fn from_row(
	(id, title, description, canvas_id, owner_id, provisioning, created_at, updated_at): DashboardRow,
) -> Result<Dashboard> {
	let provisioning = provisioning.parse().map_err(DbError::Internal)?;

	Ok(Dashboard {
		id,
		title,
		description,
		canvas_id,
		owner_id,
		provisioning,
		created_at,
		updated_at,
	})
}

#[derive(Clone)]
pub struct DashboardRepository {
	pool: SqlitePool,
}

impl DashboardRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Phase one of creation: insert the row in `pending` state.
	///
	/// The placeholder canvas id is a fresh UUID so the UNIQUE constraint
	/// holds when several creations are in flight at once.
	#[tracing::instrument(skip(self, dashboard))]
	pub async fn insert_pending(&self, owner_id: i64, dashboard: &NewDashboard) -> Result<Dashboard> {
		let placeholder = Uuid::new_v4().to_string();
		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

		let result = sqlx::query(
			r#"
			INSERT INTO dashboards (title, description, canvas_id, owner_id, provisioning, created_at, updated_at)
			VALUES (?, ?, ?, ?, 'pending', ?, ?)
			"#,
		)
		.bind(&dashboard.title)
		.bind(&dashboard.description)
		.bind(&placeholder)
		.bind(owner_id)
		.bind(&now)
		.bind(&now)
		.execute(&self.pool)
		.await?;

		let id = result.last_insert_rowid();
		self
			.get(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("dashboard {id} vanished after insert")))
	}

	/// Phase two of creation: replace the placeholder with the canvas id
	/// derived from the row's own id and mark the record `committed`.
	#[tracing::instrument(skip(self))]
	pub async fn commit_canvas_id(&self, id: i64) -> Result<Dashboard> {
		let canvas_id = id.to_string();
		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

		let result = sqlx::query(
			"UPDATE dashboards SET canvas_id = ?, provisioning = 'committed', updated_at = ? WHERE id = ?",
		)
		.bind(&canvas_id)
		.bind(&now)
		.bind(id)
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("dashboard {id}")));
		}

		self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("dashboard {id}")))
	}

	/// Record the publish outcome (`requested` or `skipped`).
	#[tracing::instrument(skip(self))]
	pub async fn set_provisioning(&self, id: i64, state: ProvisioningState) -> Result<Dashboard> {
		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

		let result = sqlx::query("UPDATE dashboards SET provisioning = ?, updated_at = ? WHERE id = ?")
			.bind(state.as_str())
			.bind(&now)
			.bind(id)
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("dashboard {id}")));
		}

		self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("dashboard {id}")))
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: i64) -> Result<Option<Dashboard>> {
		let row = sqlx::query_as::<_, DashboardRow>(
			"SELECT id, title, description, canvas_id, owner_id, provisioning, created_at, updated_at FROM dashboards WHERE id = ?",
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		row.map(from_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Dashboard>> {
		let rows = sqlx::query_as::<_, DashboardRow>(
			"SELECT id, title, description, canvas_id, owner_id, provisioning, created_at, updated_at FROM dashboards WHERE owner_id = ? ORDER BY id",
		)
		.bind(owner_id)
		.fetch_all(&self.pool)
		.await?;

		rows.into_iter().map(from_row).collect()
	}
}
