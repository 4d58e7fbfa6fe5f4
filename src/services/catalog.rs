//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Search books; an empty result is reported as NotFound
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        let query = query.trim();
        let books = self.repository.books.search(query).await?;
        tracing::debug!("Catalog search {:?}: {} match(es)", query, books.len());

        if books.is_empty() {
            return Err(AppError::NotFound(format!(
                "No books match \"{}\"",
                query
            )));
        }
        Ok(books)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .find(id)
            .await?
            .ok_or_else(|| book_not_found(id))
    }

    pub async fn create_book(&self, form: &BookForm) -> AppResult<Book> {
        let new_book = form.to_new_book().map_err(AppError::Validation)?;
        let book = self.repository.books.insert(&new_book).await?;
        tracing::info!("Catalog create: book id={} \"{}\"", book.id, book.title);
        Ok(book)
    }

    /// Update an existing book. The id is checked before the fields so an
    /// unknown id is always NotFound.
    pub async fn update_book(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        self.get_book(id).await?;
        let new_book = form.to_new_book().map_err(AppError::Validation)?;

        let book = self
            .repository
            .books
            .update(id, &new_book)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        tracing::info!("Catalog update: book id={}", id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.get_book(id).await?;
        if !self.repository.books.delete(id).await? {
            return Err(book_not_found(id));
        }
        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }

    /// Readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}

fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
