use anyhow::{Context, Result};
use portfolio_common::models::certificate::Certificate;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CertificateRow {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub image_url: String,
}

impl From<CertificateRow> for Certificate {
    fn from(row: CertificateRow) -> Self {
        Certificate {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            image_url: row.image_url,
        }
    }
}

pub struct CertificateRepo;

impl CertificateRepo {
    pub async fn create(pool: &PgPool, user_id: i32, title: &str, image_url: &str) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO certificate (user_id, title, image_url) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(title)
        .bind(image_url)
        .fetch_one(pool)
        .await
        .context("Failed to create certificate")?;
        Ok(id)
    }

    /// All certificates owned by `user_id`, oldest first.
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<CertificateRow>> {
        let rows = sqlx::query_as::<_, CertificateRow>(
            "SELECT id, user_id, title, image_url FROM certificate WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .context("Failed to list certificates")?;
        Ok(rows)
    }
}
