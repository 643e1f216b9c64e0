// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User management HTTP handlers.
//!
//! Registration and login stay local (password check against the users
//! table); everything else sits behind the central auth service via the
//! extractors in [`crate::auth_middleware`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use easel_server_auth::{hash_password, verify_password};
use easel_server_db::User;

use crate::api::AppState;
use crate::auth_middleware::{RequireAdmin, RequireAuth};
use crate::error::ServerError;
use crate::routes::dashboards::DashboardResponse;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
	pub email: String,
	pub password: String,
	pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
	pub full_name: Option<String>,
	pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserQuery {
	#[serde(default)]
	pub hard: bool,
}

/// A user profile in API responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
	pub id: i64,
	pub email: String,
	pub full_name: Option<String>,
	pub is_active: bool,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			id: user.id,
			email: user.email,
			full_name: user.full_name,
			is_active: user.is_active,
		}
	}
}

/// Success response carrying a message and the affected user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessageResponse {
	pub message: String,
	pub id: i64,
}

fn validate_password(password: &str) -> Result<(), ServerError> {
	if password.len() < MIN_PASSWORD_LEN {
		return Err(ServerError::BadRequest(format!(
			"password must be at least {MIN_PASSWORD_LEN} characters"
		)));
	}
	Ok(())
}

fn validate_email(email: &str) -> Result<(), ServerError> {
	if email.is_empty() || !email.contains('@') {
		return Err(ServerError::BadRequest("invalid email address".to_string()));
	}
	Ok(())
}

/// POST /users/register - Create a new user account.
pub async fn register(
	State(state): State<AppState>,
	Json(request): Json<RegisterRequest>,
) -> Result<Json<UserMessageResponse>, ServerError> {
	validate_email(&request.email)?;
	validate_password(&request.password)?;

	let hashed = hash_password(&request.password).map_err(|e| ServerError::Internal(e.to_string()))?;
	let user = state
		.users
		.create(&request.email, &hashed, request.full_name.as_deref())
		.await?;

	Ok(Json(UserMessageResponse {
		message: format!("user {} registered", user.email),
		id: user.id,
	}))
}

/// POST /users/login - Verify a password against the local users table.
pub async fn login(
	State(state): State<AppState>,
	Json(request): Json<LoginRequest>,
) -> Result<Json<UserMessageResponse>, ServerError> {
	let Some(user) = state.users.get_by_email(&request.email).await? else {
		return Err(ServerError::BadRequest("user not found".to_string()));
	};

	if !verify_password(&request.password, &user.hashed_password) {
		return Err(ServerError::BadRequest("incorrect password".to_string()));
	}

	let name = user.full_name.as_deref().unwrap_or(&user.email);
	Ok(Json(UserMessageResponse {
		message: format!("welcome {name}"),
		id: user.id,
	}))
}

/// GET /users - List all users.
pub async fn list_users(
	State(state): State<AppState>,
	RequireAuth(_identity): RequireAuth,
) -> Result<Json<Vec<UserResponse>>, ServerError> {
	let users = state.users.list().await?;
	Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id} - Fetch one user.
pub async fn get_user(
	State(state): State<AppState>,
	RequireAuth(_identity): RequireAuth,
	Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ServerError> {
	let user = state
		.users
		.get(id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("user {id}")))?;

	Ok(Json(user.into()))
}

/// PUT /users/{id} - Update profile fields.
pub async fn update_user(
	State(state): State<AppState>,
	RequireAuth(_identity): RequireAuth,
	Path(id): Path<i64>,
	Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ServerError> {
	let hashed = match request.password.as_deref() {
		Some(password) => {
			validate_password(password)?;
			Some(hash_password(password).map_err(|e| ServerError::Internal(e.to_string()))?)
		}
		None => None,
	};

	let user = state
		.users
		.update(id, request.full_name.as_deref(), hashed.as_deref())
		.await?;

	Ok(Json(user.into()))
}

/// DELETE /users/{id}?hard=bool - Deactivate (default) or remove a user.
///
/// Destructive, so gated on the `admin` scope. Soft delete marks the user
/// inactive and fails when already inactive; hard delete removes the row
/// and returns 204.
pub async fn delete_user(
	State(state): State<AppState>,
	RequireAdmin(identity): RequireAdmin,
	Path(id): Path<i64>,
	Query(query): Query<DeleteUserQuery>,
) -> Result<Response, ServerError> {
	tracing::info!(
		subject = %identity.subject_id,
		user_id = id,
		hard = query.hard,
		"user deletion requested"
	);

	if query.hard {
		if !state.users.delete(id).await? {
			return Err(ServerError::NotFound(format!("user {id}")));
		}
		return Ok(StatusCode::NO_CONTENT.into_response());
	}

	let user = state.users.deactivate(id).await?;
	Ok(
		Json(UserMessageResponse {
			message: format!("user {} deactivated", user.email),
			id: user.id,
		})
		.into_response(),
	)
}

/// GET /users/{id}/dashboards - List a user's dashboards.
pub async fn list_user_dashboards(
	State(state): State<AppState>,
	RequireAuth(_identity): RequireAuth,
	Path(id): Path<i64>,
) -> Result<Json<Vec<DashboardResponse>>, ServerError> {
	if state.users.get(id).await?.is_none() {
		return Err(ServerError::NotFound(format!("user {id}")));
	}

	let dashboards = state.dashboards.list_for_owner(id).await?;
	Ok(Json(
		dashboards.into_iter().map(DashboardResponse::from).collect(),
	))
}
