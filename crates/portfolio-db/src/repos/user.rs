use anyhow::{Context, Result};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct UserRepo;

impl UserRepo {
    /// Insert a user and return its generated id.
    ///
    /// `password` is stored as given; callers hash it first.
    pub async fn create(pool: &PgPool, name: &str, email: &str, password: &str) -> Result<i32> {
        let user_id: i32 = sqlx::query_scalar(
            r#"INSERT INTO "user" (name, email, password) VALUES ($1, $2, $3) RETURNING user_id"#,
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .fetch_one(pool)
        .await
        .context("Failed to create user")?;
        Ok(user_id)
    }

    /// Exact, case-sensitive match on email.
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT user_id, name, email, password FROM "user" WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("Failed to get user by email")?;
        Ok(row)
    }
}
