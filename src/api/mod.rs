//! HTTP handlers and routing

pub mod books;
pub mod health;
pub mod home;

use axum::{response::Redirect, routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(home::index))
        .route("/books", get(books::book_list))
        .route(
            "/book/create",
            get(books::book_create_get).post(books::book_create_post),
        )
        .route("/book/:id", get(books::book_detail))
        .route(
            "/book/:id/update",
            get(books::book_update_get).post(books::book_update_post),
        )
        .route(
            "/book/:id/delete",
            get(books::book_delete_get).post(books::book_delete_post),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .fallback(page_not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn page_not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}
