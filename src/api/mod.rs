//! HTTP handlers and the route table

pub mod books;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{error::AppError, views::PAGE_NOT_FOUND_MESSAGE, AppState};

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/", get(books::list_books).post(books::create_book))
        .route("/search", get(books::search_books))
        .route("/new", get(books::new_book_form))
        .route("/:id", get(books::edit_book_form).post(books::update_book))
        .route("/:id/delete", post(books::delete_book))
        .fallback(page_not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn page_not_found() -> AppError {
    AppError::NotFound(PAGE_NOT_FOUND_MESSAGE.to_string())
}
