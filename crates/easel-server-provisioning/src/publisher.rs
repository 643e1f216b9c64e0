// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Best-effort publisher for canvas creation messages.
//!
//! The baseline publisher opens a fresh broker connection per call: connect,
//! declare the durable queue, publish persistent, close. There is no pooling
//! and no retry; retry policy, if any, belongs to the caller. If the broker
//! cannot be reached the message is dropped with no durable local record of
//! the attempt.

use std::time::Duration;

use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties};
use serde::{Deserialize, Serialize};

use crate::error::ProvisioningError;

/// AMQP delivery mode marking a message persistent across broker restarts.
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Wire payload asking the canvas service to provision one canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasRequest {
	pub canvas_id: String,
	pub user_id: String,
}

/// Seam between the provisioner and the broker, so orchestration is testable
/// without a running broker.
#[async_trait::async_trait]
pub trait CanvasPublisher: Send + Sync {
	/// Enqueue one canvas creation request, best-effort-once.
	async fn publish(&self, request: &CanvasRequest) -> Result<(), ProvisioningError>;
}

/// Publishes canvas creation requests to a durable broker queue.
pub struct CanvasQueuePublisher {
	broker_url: String,
	queue_name: String,
	timeout: Duration,
}

impl CanvasQueuePublisher {
	pub fn new(broker_url: impl Into<String>, queue_name: impl Into<String>, timeout: Duration) -> Self {
		Self {
			broker_url: broker_url.into(),
			queue_name: queue_name.into(),
			timeout,
		}
	}

	async fn publish_once(&self, request: &CanvasRequest) -> Result<(), ProvisioningError> {
		let connection =
			Connection::connect(&self.broker_url, ConnectionProperties::default()).await?;
		let channel = connection.create_channel().await?;

		// Idempotent: creates the queue only if it does not exist yet.
		// durable=true keeps the queue across broker restarts.
		channel
			.queue_declare(
				&self.queue_name,
				QueueDeclareOptions {
					durable: true,
					..QueueDeclareOptions::default()
				},
				FieldTable::default(),
			)
			.await?;

		let body = serde_json::to_vec(request)?;
		channel
			.basic_publish(
				"",
				&self.queue_name,
				BasicPublishOptions::default(),
				&body,
				BasicProperties::default().with_delivery_mode(DELIVERY_MODE_PERSISTENT),
			)
			.await?
			.await?;

		tracing::info!(
			canvas_id = %request.canvas_id,
			queue = %self.queue_name,
			"canvas creation request enqueued"
		);

		// The message is already accepted; a failure tearing down the
		// connection must not be reported as a failed publish.
		let _ = connection.close(200, "publish complete").await;
		Ok(())
	}
}

#[async_trait::async_trait]
impl CanvasPublisher for CanvasQueuePublisher {
	#[tracing::instrument(skip_all, fields(canvas_id = %request.canvas_id))]
	async fn publish(&self, request: &CanvasRequest) -> Result<(), ProvisioningError> {
		match tokio::time::timeout(self.timeout, self.publish_once(request)).await {
			Ok(result) => result,
			Err(_) => Err(ProvisioningError::BrokerUnavailable(format!(
				"publish timed out after {:?}",
				self.timeout
			))),
		}
	}
}
