//! Books repository backed by PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{escape_like, BookStore};
use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::book::{Book, NewBook},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
    case_insensitive_search: bool,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>, catalog: &CatalogConfig) -> Self {
        Self {
            pool,
            case_insensitive_search: catalog.case_insensitive_search,
        }
    }

    fn search_sql(&self) -> String {
        let op = if self.case_insensitive_search { "ILIKE" } else { "LIKE" };
        format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books
            WHERE title {op} $1 ESCAPE '\'
               OR author {op} $1 ESCAPE '\'
               OR genre {op} $1 ESCAPE '\'
               OR year = $2
            ORDER BY id
            "#
        )
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = format!("%{}%", escape_like(query));
        // NULL never equals a year, so non-numeric queries only match on text
        let year = query.parse::<i32>().ok();

        let rows = sqlx::query_as::<_, Book>(&self.search_sql())
            .bind(pattern)
            .bind(year)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = $5
            WHERE id = $6
            RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.year)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
