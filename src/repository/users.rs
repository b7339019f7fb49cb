//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{enums::Role, user::User},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersStore: Send + Sync {
    /// Exact (case-sensitive) email lookup
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user unless the email is already taken, returning the stored row
    async fn insert_or_get(&self, name: &str, email: &str, role: Role) -> AppResult<User>;
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersStore for UsersRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, avatar_url FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_or_get(&self, name: &str, email: &str, role: Role) -> AppResult<User> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, role, avatar_url
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = inserted {
            return Ok(user);
        }

        // Lost a race with a concurrent first login for the same email
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, avatar_url FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
