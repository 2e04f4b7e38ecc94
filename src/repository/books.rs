//! PostgreSQL-backed book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::RecordStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookData},
};

#[derive(Clone)]
pub struct PgRecordStore {
    pool: Pool<Postgres>,
}

impl PgRecordStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, name, edition, price FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, name, edition, price FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create(&self, data: &BookData) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, edition, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, edition, price
            "#,
        )
        .bind(&data.name)
        .bind(data.edition)
        .bind(data.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &BookData) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET name = $1, edition = $2, price = $3
            WHERE id = $4
            RETURNING id, name, edition, price
            "#,
        )
        .bind(&data.name)
        .bind(data.edition)
        .bind(data.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}
