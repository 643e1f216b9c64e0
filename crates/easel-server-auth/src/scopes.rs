// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scope algebra, kept free of any HTTP concern so it is testable without a
//! live auth service.

use std::collections::BTreeSet;

/// Compute which required scopes the granted set lacks.
///
/// The result is sorted (BTreeSet iteration order), so error messages built
/// from it are reproducible.
pub fn missing_scopes(required: &BTreeSet<String>, granted: &BTreeSet<String>) -> Vec<String> {
	required.difference(granted).cloned().collect()
}
