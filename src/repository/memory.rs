//! In-memory book store used by the handler tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, NewBook},
};

#[derive(Default)]
pub struct MemoryBookStore {
    books: Mutex<Vec<Book>>,
    case_sensitive: bool,
}

impl MemoryBookStore {
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }

    fn contains(&self, haystack: &str, needle: &str) -> bool {
        if self.case_sensitive {
            haystack.contains(needle)
        } else {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.snapshot())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let year = query.parse::<i32>().ok();
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|b| {
                self.contains(&b.title, query)
                    || self.contains(&b.author, query)
                    || b.genre.as_deref().is_some_and(|g| self.contains(g, query))
                    || (year.is_some() && b.year == year)
            })
            .collect())
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.snapshot().into_iter().find(|b| b.id == id))
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut books = self.books.lock().unwrap();
        let id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let row = Book {
            id,
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year,
            created_at: now,
            updated_at: now,
        };
        books.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Option<Book>> {
        let mut books = self.books.lock().unwrap();
        Ok(books.iter_mut().find(|b| b.id == id).map(|row| {
            row.title = book.title.clone();
            row.author = book.author.clone();
            row.genre = book.genre.clone();
            row.year = book.year;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
