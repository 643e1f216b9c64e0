// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! easel user service binary.

use clap::{Parser, Subcommand};
use easel_server::{create_app_state, create_router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// easel server - user service with external canvas provisioning.
#[derive(Parser, Debug)]
#[command(name = "easel-server", about = "easel user service", version)]
struct Args {
	/// Subcommands for easel-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("easel-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = easel_server_config::load_config()?;

	// Setup tracing; RUST_LOG overrides the configured level
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

	if config.logging.json {
		tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer().json())
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer())
			.init();
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting easel-server"
	);

	// Create database pool and run migrations
	let pool = easel_server_db::create_pool(&config.database.url).await?;
	easel_server_db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config);
	let validator = Arc::clone(&state.validator);

	let app = create_router(state).layer(TraceLayer::new_for_http());

	// Start server
	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	// Run server with graceful shutdown
	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("received shutdown signal");
		}
	}

	// Dropping the server released the router's state clones; reclaim the
	// validator to release its outbound client.
	match Arc::try_unwrap(validator) {
		Ok(mut validator) => validator.shutdown(),
		Err(_) => tracing::debug!("validator still shared at shutdown"),
	}

	tracing::info!("server shutdown complete");
	Ok(())
}
