// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Canvas provisioning trigger for easel server.
//!
//! Dashboard creation commits locally first, then asks an external workflow
//! (via a durable broker queue) to provision the canvas. The two steps are
//! deliberately decoupled: broker failure never blocks or fails the local
//! write, it only leaves the record in an inspectable `skipped` state.

pub mod error;
pub mod provisioner;
pub mod publisher;

pub use error::ProvisioningError;
pub use provisioner::CanvasProvisioner;
pub use publisher::{CanvasPublisher, CanvasQueuePublisher, CanvasRequest};
