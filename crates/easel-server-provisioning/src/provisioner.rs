// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Orchestrates dashboard creation and the canvas provisioning trigger.
//!
//! The canvas id is derived from the dashboard's own row id, so creation is
//! two writes: insert pending with a placeholder, then commit the derived
//! id. Only after the commit is durable does the publish attempt run, and a
//! broker failure never fails the creation: the record is marked `skipped`
//! and returned successfully. Callers must not infer from a successful
//! creation that provisioning will happen.

use std::sync::Arc;

use easel_server_db::{Dashboard, DashboardRepository, DbError, NewDashboard, ProvisioningState};

use crate::publisher::{CanvasPublisher, CanvasRequest};

pub struct CanvasProvisioner {
	dashboards: DashboardRepository,
	publisher: Arc<dyn CanvasPublisher>,
}

impl CanvasProvisioner {
	pub fn new(dashboards: DashboardRepository, publisher: Arc<dyn CanvasPublisher>) -> Self {
		Self {
			dashboards,
			publisher,
		}
	}

	/// Create a dashboard and trigger canvas provisioning for it.
	///
	/// Only local persistence failures propagate. The returned record's
	/// `provisioning` field reports the publish outcome: `requested` when
	/// the message was enqueued, `skipped` when the broker was unavailable.
	/// Nothing in this service revisits `skipped` records; reconciliation
	/// is an external process.
	#[tracing::instrument(skip(self, dashboard))]
	pub async fn create_dashboard(
		&self,
		owner_id: i64,
		dashboard: &NewDashboard,
	) -> Result<Dashboard, DbError> {
		let pending = self.dashboards.insert_pending(owner_id, dashboard).await?;
		let committed = self.dashboards.commit_canvas_id(pending.id).await?;

		let request = CanvasRequest {
			canvas_id: committed.canvas_id.clone(),
			user_id: committed.owner_id.to_string(),
		};

		match self.publisher.publish(&request).await {
			Ok(()) => {
				self
					.dashboards
					.set_provisioning(committed.id, ProvisioningState::Requested)
					.await
			}
			Err(e) => {
				tracing::warn!(
					dashboard_id = committed.id,
					canvas_id = %request.canvas_id,
					error = %e,
					"canvas provisioning skipped, broker unavailable"
				);
				self
					.dashboards
					.set_provisioning(committed.id, ProvisioningState::Skipped)
					.await
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ProvisioningError;
	use easel_server_db::testing::create_dashboard_test_pool;
	use std::sync::atomic::{AtomicBool, Ordering};
	use tokio::sync::Mutex;

	struct MockPublisher {
		published: Mutex<Vec<CanvasRequest>>,
		should_fail: AtomicBool,
	}

	impl MockPublisher {
		fn new() -> Self {
			Self {
				published: Mutex::new(Vec::new()),
				should_fail: AtomicBool::new(false),
			}
		}

		fn set_should_fail(&self, fail: bool) {
			self.should_fail.store(fail, Ordering::SeqCst);
		}

		async fn published(&self) -> Vec<CanvasRequest> {
			self.published.lock().await.clone()
		}
	}

	#[async_trait::async_trait]
	impl CanvasPublisher for MockPublisher {
		async fn publish(&self, request: &CanvasRequest) -> Result<(), ProvisioningError> {
			if self.should_fail.load(Ordering::SeqCst) {
				return Err(ProvisioningError::BrokerUnavailable(
					"connection refused".to_string(),
				));
			}
			self.published.lock().await.push(request.clone());
			Ok(())
		}
	}

	fn new_dashboard(title: &str) -> NewDashboard {
		NewDashboard {
			title: title.to_string(),
			description: None,
		}
	}

	async fn provisioner_with_mock() -> (CanvasProvisioner, Arc<MockPublisher>) {
		let pool = create_dashboard_test_pool().await;
		let publisher = Arc::new(MockPublisher::new());
		let provisioner = CanvasProvisioner::new(
			DashboardRepository::new(pool),
			publisher.clone() as Arc<dyn CanvasPublisher>,
		);
		(provisioner, publisher)
	}

	#[tokio::test]
	async fn successful_publish_marks_requested() {
		let (provisioner, publisher) = provisioner_with_mock().await;

		let dashboard = provisioner
			.create_dashboard(7, &new_dashboard("Metrics"))
			.await
			.unwrap();

		assert_eq!(dashboard.provisioning, ProvisioningState::Requested);
		assert_eq!(dashboard.canvas_id, dashboard.id.to_string());

		let published = publisher.published().await;
		assert_eq!(published.len(), 1);
		assert_eq!(published[0].canvas_id, dashboard.canvas_id);
		assert_eq!(published[0].user_id, "7");
	}

	#[tokio::test]
	async fn broker_failure_still_returns_committed_record() {
		let (provisioner, publisher) = provisioner_with_mock().await;
		publisher.set_should_fail(true);

		let dashboard = provisioner
			.create_dashboard(1, &new_dashboard("Metrics"))
			.await
			.unwrap();

		assert_eq!(dashboard.provisioning, ProvisioningState::Skipped);
		// The canvas id is still derived from the committed row id.
		assert_eq!(dashboard.canvas_id, dashboard.id.to_string());
		// No message reached the broker.
		assert!(publisher.published().await.is_empty());
	}

	#[tokio::test]
	async fn sequential_creations_never_share_a_canvas_id() {
		let (provisioner, _publisher) = provisioner_with_mock().await;

		let a = provisioner
			.create_dashboard(1, &new_dashboard("A"))
			.await
			.unwrap();
		let b = provisioner
			.create_dashboard(1, &new_dashboard("B"))
			.await
			.unwrap();

		assert_ne!(a.canvas_id, b.canvas_id);
	}

	#[tokio::test]
	async fn concurrent_creations_for_different_owners_stay_unique() {
		let (provisioner, _publisher) = provisioner_with_mock().await;

		let dashboard_a = new_dashboard("A");
		let dashboard_b = new_dashboard("B");
		let (a, b) = tokio::join!(
			provisioner.create_dashboard(1, &dashboard_a),
			provisioner.create_dashboard(2, &dashboard_b),
		);

		let a = a.unwrap();
		let b = b.unwrap();
		assert_ne!(a.canvas_id, b.canvas_id);
	}

	#[tokio::test]
	async fn published_canvas_id_refers_to_committed_data() {
		let (provisioner, publisher) = provisioner_with_mock().await;

		let dashboard = provisioner
			.create_dashboard(3, &new_dashboard("Ops"))
			.await
			.unwrap();

		// The payload was built from the already-committed record, so its
		// canvas id parses back to the row id.
		let published = publisher.published().await;
		let sent: i64 = published[0].canvas_id.parse().unwrap();
		assert_eq!(sent, dashboard.id);
	}
}
