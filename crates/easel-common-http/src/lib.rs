// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for easel.
//!
//! This crate provides:
//! - A pre-configured HTTP client builder with consistent User-Agent header
//! - Trust-anchor (root certificate) loading for talking to internal services

mod client;

pub use client::{builder, load_root_certificate, user_agent, TrustAnchorError};
