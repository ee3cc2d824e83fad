use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    /// Persists a new user; fails with `DuplicateEmail` when the email is taken
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// This provides a realistic implementation that can be used in development
/// without requiring a real database connection. Data is stored in memory
/// and will be lost when the application restarts.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of users in the repository
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, email = %user.email, "Creating user in memory");

        let mut users = self.users.lock().unwrap();
        // The email uniqueness constraint the database schema enforces
        if users.values().any(|u| u.email == user.email) {
            warn!(email = %user.email, "Email already registered");
            return Err(AppError::DuplicateEmail);
        }
        users.insert(user.id.clone(), user.clone());

        debug!(user_id = %user.id, "User created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!(email = %email, "Fetching user by email from memory");

        let users = self.users.lock().unwrap();
        let user = users.values().find(|u| u.email == email).cloned();

        match &user {
            Some(u) => debug!(user_id = %u.id, "User found in memory"),
            None => debug!(email = %email, "User not found in memory"),
        }

        Ok(user)
    }
}

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, email = %user.email, "Creating user in database");

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, created_at) VALUES ($1, $2, $3, $4, $5, $6)"
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The unique index on email reports duplicates
            if let sqlx::Error::Database(db) = &e {
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                    warn!(email = %user.email, "Email already registered");
                    return AppError::DuplicateEmail;
                }
            }
            warn!(error = %e, "Failed to create user in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(user_id = %user.id, "User created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!(email = %email, "Fetching user by email from database");

        let row = sqlx::query(
            "SELECT id, email, password_hash, first_name, last_name, created_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch user from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|row| UserModel {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            created_at: row.get("created_at"),
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn create_test_user(email: &str) -> UserModel {
            UserModel::new(
                email.to_string(),
                "$2b$12$fakehash".to_string(),
                "Test".to_string(),
                "User".to_string(),
            )
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();
        let user = create_test_user("guest@example.com");

        // Create user
        repo.create_user(&user).await.unwrap();

        // Get by email
        let by_email = repo.get_user_by_email("guest@example.com").await.unwrap();
        assert!(by_email.is_some());
        assert_eq!(by_email.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_get_nonexistent_user() {
        let repo = InMemoryUserRepository::new();

        let result = repo.get_user_by_email("nobody@example.com").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        let first = create_test_user("guest@example.com");
        let second = create_test_user("guest@example.com");

        repo.create_user(&first).await.unwrap();

        // Second registration with the same email must fail and persist nothing
        let result = repo.create_user(&second).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_emails_coexist() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&create_test_user("a@example.com"))
            .await
            .unwrap();
        repo.create_user(&create_test_user("b@example.com"))
            .await
            .unwrap();

        assert_eq!(repo.user_count(), 2);
    }
}
