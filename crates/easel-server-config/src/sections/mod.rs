// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod authority;
mod broker;
mod database;
mod http;
mod logging;

pub use authority::AuthorityConfig;
pub use broker::BrokerConfig;
pub use database::DatabaseConfig;
pub use http::HttpConfig;
pub use logging::LoggingConfig;
