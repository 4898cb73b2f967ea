//! Catalog home page

use axum::extract::State;
use maud::{Markup, Render};

use crate::{error::AppResult, views::home::IndexView, AppState};

/// Home page with book and author counts
pub async fn index(State(state): State<AppState>) -> AppResult<Markup> {
    let counts = state.services.catalog.counts().await?;

    Ok(IndexView {
        title: "Local Library Home".to_string(),
        book_count: counts.books,
        author_count: counts.authors,
    }
    .render())
}
