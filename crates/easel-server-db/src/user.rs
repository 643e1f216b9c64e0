// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::{DbError, Result};

/// A registered user.
///
/// `hashed_password` never leaves the server process; API response types
/// carry their own projection of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	pub email: String,
	pub hashed_password: String,
	pub full_name: Option<String>,
	pub is_active: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

type UserRow = (
	i64,
	String,
	String,
	Option<String>,
	bool,
	DateTime<Utc>,
	DateTime<Utc>,
);

fn from_row(
	(id, email, hashed_password, full_name, is_active, created_at, updated_at): UserRow,
) -> User {
	User {
		id,
		email,
		hashed_password,
		full_name,
		is_active,
		created_at,
		updated_at,
	}
}

#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new user. Fails with `Conflict` when the email is taken.
	#[tracing::instrument(skip(self, hashed_password))]
	pub async fn create(
		&self,
		email: &str,
		hashed_password: &str,
		full_name: Option<&str>,
	) -> Result<User> {
		if self.get_by_email(email).await?.is_some() {
			return Err(DbError::Conflict(format!("user {email} already exists")));
		}

		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
		let result = sqlx::query(
			r#"
			INSERT INTO users (email, hashed_password, full_name, is_active, created_at, updated_at)
			VALUES (?, ?, ?, 1, ?, ?)
			"#,
		)
		.bind(email)
		.bind(hashed_password)
		.bind(full_name)
		.bind(&now)
		.bind(&now)
		.execute(&self.pool)
		.await?;

		let id = result.last_insert_rowid();
		self
			.get(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("user {id} vanished after insert")))
	}

	#[tracing::instrument(skip(self))]
	pub async fn get(&self, id: i64) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(
			"SELECT id, email, hashed_password, full_name, is_active, created_at, updated_at FROM users WHERE id = ?",
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(from_row))
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
		let row = sqlx::query_as::<_, UserRow>(
			"SELECT id, email, hashed_password, full_name, is_active, created_at, updated_at FROM users WHERE email = ?",
		)
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(from_row))
	}

	#[tracing::instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<User>> {
		let rows = sqlx::query_as::<_, UserRow>(
			"SELECT id, email, hashed_password, full_name, is_active, created_at, updated_at FROM users ORDER BY id",
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows.into_iter().map(from_row).collect())
	}

	/// Update profile fields; `None` leaves a field untouched.
	#[tracing::instrument(skip(self, hashed_password))]
	pub async fn update(
		&self,
		id: i64,
		full_name: Option<&str>,
		hashed_password: Option<&str>,
	) -> Result<User> {
		let existing = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("user {id}")))?;

		let full_name = full_name.map(str::to_string).or(existing.full_name);
		let hashed_password = hashed_password.unwrap_or(&existing.hashed_password);

		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
		sqlx::query("UPDATE users SET full_name = ?, hashed_password = ?, updated_at = ? WHERE id = ?")
			.bind(&full_name)
			.bind(hashed_password)
			.bind(&now)
			.bind(id)
			.execute(&self.pool)
			.await?;

		self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("user {id}")))
	}

	/// Soft delete: mark the user inactive. Fails with `Conflict` when the
	/// user is already inactive.
	#[tracing::instrument(skip(self))]
	pub async fn deactivate(&self, id: i64) -> Result<User> {
		let user = self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("user {id}")))?;

		if !user.is_active {
			return Err(DbError::Conflict(format!("user {id} already inactive")));
		}

		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
		sqlx::query("UPDATE users SET is_active = 0, updated_at = ? WHERE id = ?")
			.bind(&now)
			.bind(id)
			.execute(&self.pool)
			.await?;

		self
			.get(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("user {id}")))
	}

	/// Hard delete: remove the row. Returns whether a row was deleted.
	#[tracing::instrument(skip(self))]
	pub async fn delete(&self, id: i64) -> Result<bool> {
		let result = sqlx::query("DELETE FROM users WHERE id = ?")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_user_test_pool;

	async fn repo() -> UserRepository {
		UserRepository::new(create_user_test_pool().await)
	}

	#[tokio::test]
	async fn test_create_and_get_user() {
		let repo = repo().await;
		let user = repo
			.create("test@example.com", "hash", Some("Test User"))
			.await
			.unwrap();

		assert!(user.id > 0);
		assert!(user.is_active);

		let fetched = repo.get(user.id).await.unwrap().unwrap();
		assert_eq!(fetched.email, "test@example.com");
		assert_eq!(fetched.full_name.as_deref(), Some("Test User"));
	}

	#[tokio::test]
	async fn test_duplicate_email_conflicts() {
		let repo = repo().await;
		repo.create("dupe@example.com", "hash", None).await.unwrap();

		let result = repo.create("dupe@example.com", "hash", None).await;
		assert!(matches!(result, Err(DbError::Conflict(_))));
	}

	#[tokio::test]
	async fn test_get_missing_user_returns_none() {
		let repo = repo().await;
		assert!(repo.get(9999).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_update_full_name_keeps_password() {
		let repo = repo().await;
		let user = repo
			.create("update@example.com", "original-hash", Some("Old Name"))
			.await
			.unwrap();

		let updated = repo.update(user.id, Some("New Name"), None).await.unwrap();
		assert_eq!(updated.full_name.as_deref(), Some("New Name"));
		assert_eq!(updated.hashed_password, "original-hash");
	}

	#[tokio::test]
	async fn test_update_missing_user_is_not_found() {
		let repo = repo().await;
		let result = repo.update(9999, Some("Ghost"), None).await;
		assert!(matches!(result, Err(DbError::NotFound(_))));
	}

	#[tokio::test]
	async fn test_deactivate_then_again_conflicts() {
		let repo = repo().await;
		let user = repo.create("soft@example.com", "hash", None).await.unwrap();

		let deactivated = repo.deactivate(user.id).await.unwrap();
		assert!(!deactivated.is_active);

		let result = repo.deactivate(user.id).await;
		assert!(matches!(result, Err(DbError::Conflict(_))));
	}

	#[tokio::test]
	async fn test_hard_delete_removes_row() {
		let repo = repo().await;
		let user = repo.create("hard@example.com", "hash", None).await.unwrap();

		assert!(repo.delete(user.id).await.unwrap());
		assert!(repo.get(user.id).await.unwrap().is_none());
		assert!(!repo.delete(user.id).await.unwrap());
	}

	#[tokio::test]
	async fn test_list_orders_by_id() {
		let repo = repo().await;
		repo.create("a@example.com", "hash", None).await.unwrap();
		repo.create("b@example.com", "hash", None).await.unwrap();

		let users = repo.list().await.unwrap();
		assert_eq!(users.len(), 2);
		assert!(users[0].id < users[1].id);
	}
}
