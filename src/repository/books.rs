//! Books repository for database operations.
//!
//! The `author` column holds a free-form reference; it is resolved against
//! `authors` with a LEFT JOIN so dangling references read back as "no author".
//! Sorting uses the "C" collation: titles order by code point, the same as
//! the in-memory store.

use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookDetail, BookInput, BookListEntry},
};

/// Build the populated author from the `author_*` columns of a joined row
fn populated_author(row: &PgRow) -> Option<Author> {
    let id: Option<Uuid> = row.get("author_id");
    id.map(|id| Author {
        id,
        first_name: row.get("author_first_name"),
        family_name: row.get("author_family_name"),
    })
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All books, title and populated author only, sorted by title
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title,
                   a.id AS author_id,
                   a.first_name AS author_first_name,
                   a.family_name AS author_family_name
            FROM books b
            LEFT JOIN authors a ON a.id::text = b.author
            ORDER BY b.title COLLATE "C" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| BookListEntry {
                id: r.get("id"),
                title: r.get("title"),
                author: populated_author(r),
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, summary, isbn, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Book by id with its author populated
    pub async fn get_detail(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.title, b.summary, b.isbn,
                   a.id AS author_id,
                   a.first_name AS author_first_name,
                   a.family_name AS author_family_name
            FROM books b
            LEFT JOIN authors a ON a.id::text = b.author
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| BookDetail {
            id: r.get("id"),
            title: r.get("title"),
            author: populated_author(&r),
            summary: r.get("summary"),
            isbn: r.get("isbn"),
        }))
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let now = Utc::now();
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author, summary, isbn, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, title, author, summary, isbn, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    /// Replace the writable fields of a book. `None` when the id is absent.
    pub async fn update(&self, id: Uuid, data: &BookInput) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $2, author = $3, summary = $4, isbn = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, title, author, summary, isbn, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Delete a book; returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
