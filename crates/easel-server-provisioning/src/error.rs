// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors that can occur while triggering canvas provisioning.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("broker unavailable: {0}")]
	BrokerUnavailable(String),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl From<lapin::Error> for ProvisioningError {
	fn from(e: lapin::Error) -> Self {
		ProvisioningError::BrokerUnavailable(e.to_string())
	}
}
