//! In-memory book store for development and tests

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use super::RecordStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookData},
};

#[derive(Debug)]
struct Shelf {
    /// Ids are never reused, even after a delete
    next_id: i32,
    books: Vec<Book>,
}

/// Process-local store; records are kept in insertion order
#[derive(Debug)]
pub struct InMemoryRecordStore {
    shelf: Mutex<Shelf>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            shelf: Mutex::new(Shelf {
                next_id: 1,
                books: Vec::new(),
            }),
        }
    }

    fn shelf(&self) -> AppResult<MutexGuard<'_, Shelf>> {
        self.shelf
            .lock()
            .map_err(|_| AppError::Internal("book store lock poisoned".to_string()))
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.shelf()?.books.clone())
    }

    async fn get(&self, id: i32) -> AppResult<Book> {
        self.shelf()?
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, data: &BookData) -> AppResult<Book> {
        let mut shelf = self.shelf()?;
        let id = shelf.next_id;
        shelf.next_id = id
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("book id space exhausted".to_string()))?;

        let book = Book {
            id,
            name: data.name.clone(),
            edition: data.edition,
            price: data.price,
        };
        shelf.books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, data: &BookData) -> AppResult<Book> {
        let mut shelf = self.shelf()?;
        let book = shelf
            .books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| not_found(id))?;

        book.name = data.name.clone();
        book.edition = data.edition;
        book.price = data.price;
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut shelf = self.shelf()?;
        let position = shelf
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| not_found(id))?;
        shelf.books.remove(position);
        Ok(())
    }
}
