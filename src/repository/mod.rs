//! Repository layer for database operations

pub mod books;
#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::book::{Book, NewBook},
};

/// Storage for book records.
///
/// Implementations only ever receive validated [`NewBook`] values; the
/// `Option`/`bool` returns report a missing id so callers decide the error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Books whose title, author or genre contains `query`, or whose year equals it
    async fn search(&self, query: &str) -> AppResult<Vec<Book>>;

    async fn find(&self, id: i32) -> AppResult<Option<Book>>;

    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Option<Book>>;

    /// Returns true if a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Round-trip to storage, used by the readiness check
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the storage backends
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>, catalog: &CatalogConfig) -> Self {
        Self::with_store(Arc::new(books::BooksRepository::new(pool, catalog)))
    }

    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}

/// Escape LIKE wildcards so the query matches literally (escape char `\`)
pub fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
