//! Repository layer for catalog persistence

pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::book::{Book, BookData},
};

pub use books::PgRecordStore;
pub use memory::InMemoryRecordStore;

/// Persistence contract for catalog records.
///
/// Every mutating call is atomic: it either fully applies or has no effect.
/// Missing ids are reported as `AppError::NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get(&self, id: i32) -> AppResult<Book>;

    /// Store validated data under a new id
    async fn create(&self, data: &BookData) -> AppResult<Book>;

    /// Replace every mutable field of an existing record
    async fn update(&self, id: i32, data: &BookData) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding the catalog store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn RecordStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(PgRecordStore::new(pool)))
    }

    /// Create a repository backed by a process-local store
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryRecordStore::new()))
    }

    pub fn with_store(books: Arc<dyn RecordStore>) -> Self {
        Self { books }
    }
}
