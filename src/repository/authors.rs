//! Authors repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Author};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All authors, ordered for display in selection lists
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name
            FROM authors
            ORDER BY family_name COLLATE "C", first_name COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
