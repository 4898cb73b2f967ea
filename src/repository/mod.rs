//! Repository layer for catalog storage
//!
//! [`CatalogStore`] is the seam between services and persistence. Services
//! hold an `Arc<dyn CatalogStore>`; [`Repository`] implements it over
//! PostgreSQL and [`memory::MemoryStore`] over process memory.

pub mod authors;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookDetail, BookInput, BookListEntry},
};

/// Typed accessors over the `books` and `authors` collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn count_books(&self) -> AppResult<i64>;

    async fn count_authors(&self) -> AppResult<i64>;

    /// Books projected to title and populated author, sorted by title ascending
    async fn list_books(&self) -> AppResult<Vec<BookListEntry>>;

    /// Authors sorted by family name, then first name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;

    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>>;

    async fn find_book_populated(&self, id: Uuid) -> AppResult<Option<BookDetail>>;

    /// Persist a new book under a fresh id
    async fn create_book(&self, data: &BookInput) -> AppResult<Book>;

    /// Replace the writable fields of the book at `id`
    async fn update_book(&self, id: Uuid, data: &BookInput) -> AppResult<Option<Book>>;

    /// Remove the book at `id`; `false` when there was nothing to remove
    async fn delete_book(&self, id: Uuid) -> AppResult<bool>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed repository holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub authors: authors::AuthorsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn list_books(&self) -> AppResult<Vec<BookListEntry>> {
        self.books.list().await
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books.get_by_id(id).await
    }

    async fn find_book_populated(&self, id: Uuid) -> AppResult<Option<BookDetail>> {
        self.books.get_detail(id).await
    }

    async fn create_book(&self, data: &BookInput) -> AppResult<Book> {
        self.books.create(data).await
    }

    async fn update_book(&self, id: Uuid, data: &BookInput) -> AppResult<Option<Book>> {
        self.books.update(id, data).await
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        self.books.delete(id).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
