//! Book pages
//!
//! GET handlers render a view; successful POSTs redirect to the page showing
//! the result. A POST that fails validation re-renders its form with the
//! sanitized values and the error list instead of failing the request.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use maud::{Markup, Render};

use crate::{
    error::{AppError, AppResult},
    models::{book::parse_book_id, BookInput},
    validation::{self, BOOK_RULES},
    views::books::{BookDeleteView, BookDetailView, BookFormView, BookListView},
    AppState,
};

/// Where delete flows land
pub const BOOK_LIST_URL: &str = "/catalog/books";

const CREATE_TITLE: &str = "Create Book";
const UPDATE_TITLE: &str = "Update Book";

/// List all books, sorted by title
pub async fn book_list(State(state): State<AppState>) -> AppResult<Markup> {
    let book_list = state.services.catalog.list_books().await?;

    Ok(BookListView {
        title: "Book List".to_string(),
        book_list,
    }
    .render())
}

/// Book detail with its author
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let book = state
        .services
        .catalog
        .get_book_detail(parse_book_id(&id))
        .await?;

    Ok(BookDetailView {
        title: book.title.clone(),
        book,
    }
    .render())
}

/// Empty book form
pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Markup> {
    let authors = state.services.catalog.list_authors().await?;

    Ok(BookFormView {
        title: CREATE_TITLE.to_string(),
        authors,
        book: None,
        errors: Vec::new(),
    }
    .render())
}

/// Validate and create a book, then redirect to it
pub async fn book_create_post(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let validation = validation::run(BOOK_RULES, &fields);
    let book = BookInput::from_validation(&validation);

    if !validation.is_valid() {
        tracing::debug!("Book create rejected: {} invalid field(s)", validation.errors().len());
        let authors = state.services.catalog.list_authors().await?;
        return Ok(BookFormView {
            title: CREATE_TITLE.to_string(),
            authors,
            book: Some(book),
            errors: validation.into_errors(),
        }
        .render()
        .into_response());
    }

    let created = state.services.catalog.create_book(&book).await?;
    Ok(Redirect::to(&created.url()).into_response())
}

/// Book form pre-filled with the stored record
pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let authors = state.services.catalog.list_authors().await?;
    let book = state
        .services
        .catalog
        .find_book(parse_book_id(&id))
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

    Ok(BookFormView {
        title: UPDATE_TITLE.to_string(),
        authors,
        book: Some(BookInput::from(&book)),
        errors: Vec::new(),
    }
    .render())
}

/// Validate and replace a book, then redirect to it
pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let validation = validation::run(BOOK_RULES, &fields);
    let book = BookInput::from_validation(&validation);

    if !validation.is_valid() {
        tracing::debug!("Book update rejected: {} invalid field(s)", validation.errors().len());
        let authors = state.services.catalog.list_authors().await?;
        return Ok(BookFormView {
            title: UPDATE_TITLE.to_string(),
            authors,
            book: Some(book),
            errors: validation.into_errors(),
        }
        .render()
        .into_response());
    }

    let updated = state
        .services
        .catalog
        .update_book(parse_book_id(&id), &book)
        .await?;
    Ok(Redirect::to(&updated.url()).into_response())
}

/// Delete confirmation, or back to the list when the book is gone
pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Some(book) = state.services.catalog.find_book(parse_book_id(&id)).await? else {
        return Ok(Redirect::to(BOOK_LIST_URL).into_response());
    };

    Ok(BookDeleteView {
        title: "Delete Book".to_string(),
        book,
    }
    .render()
    .into_response())
}

/// Delete a book. Absent books redirect exactly like present ones.
pub async fn book_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.services.catalog.delete_book(parse_book_id(&id)).await?;
    Ok(Redirect::to(BOOK_LIST_URL))
}
