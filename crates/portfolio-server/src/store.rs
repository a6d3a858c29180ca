use anyhow::Result;
use async_trait::async_trait;
use portfolio_common::models::auth::User;
use portfolio_common::models::certificate::Certificate;
use portfolio_db::{CertificateRepo, UserRepo, UserRow};
use sqlx::PgPool;

use crate::auth::Credential;

/// A user as seen by the auth core, credential already classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub credential: Credential,
}

impl UserRecord {
    /// Client-facing view without the credential
    pub fn profile(&self) -> User {
        User {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.user_id,
            name: row.name,
            credential: Credential::parse(&row.password),
            email: row.email,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact match on email; no case folding or trimming.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
}

#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Certificates owned by `user_id`, ordered by id.
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Certificate>>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let row = UserRepo::get_by_email(&self.pool, email).await?;
        Ok(row.map(UserRecord::from))
    }
}

#[async_trait]
impl CertificateStore for PgStore {
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Certificate>> {
        let rows = CertificateRepo::list_by_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Certificate::from).collect())
    }
}
