//! Catalog service: book reads and writes on top of a [`CatalogStore`]

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookDetail, BookInput, BookListEntry},
    repository::CatalogStore,
};

/// Book and author totals shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: i64,
    pub authors: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Book and author counts, fetched together
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, authors) =
            tokio::try_join!(self.store.count_books(), self.store.count_authors())?;
        Ok(CatalogCounts { books, authors })
    }

    pub async fn list_books(&self) -> AppResult<Vec<BookListEntry>> {
        self.store.list_books().await
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.store.list_authors().await
    }

    /// Book with populated author; `NotFound` when the id does not resolve
    pub async fn get_book_detail(&self, id: Option<Uuid>) -> AppResult<BookDetail> {
        let book = match id {
            Some(id) => self.store.find_book_populated(id).await?,
            None => None,
        };
        book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Raw book record, `None` when absent
    pub async fn find_book(&self, id: Option<Uuid>) -> AppResult<Option<Book>> {
        match id {
            Some(id) => self.store.find_book(id).await,
            None => Ok(None),
        }
    }

    pub async fn create_book(&self, data: &BookInput) -> AppResult<Book> {
        let book = self.store.create_book(data).await?;
        tracing::info!("Catalog: created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Replace the book at `id`; `NotFound` when there is no such book
    pub async fn update_book(&self, id: Option<Uuid>, data: &BookInput) -> AppResult<Book> {
        let updated = match id {
            Some(id) => self.store.update_book(id, data).await?,
            None => None,
        };
        let book = updated.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Catalog: updated book id={}", book.id);
        Ok(book)
    }

    /// Delete the book at `id`. Deleting an absent book is not an error.
    pub async fn delete_book(&self, id: Option<Uuid>) -> AppResult<()> {
        let Some(id) = id else {
            tracing::debug!("Catalog: delete skipped, malformed book id");
            return Ok(());
        };
        if self.store.delete_book(id).await? {
            tracing::info!("Catalog: deleted book id={}", id);
        } else {
            tracing::debug!("Catalog: delete of absent book id={}", id);
        }
        Ok(())
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
