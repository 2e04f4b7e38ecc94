//! Data models for the bookshop catalog

pub mod book;
pub mod catalog;

// Re-export commonly used types
pub use book::{Book, BookData, BookField, BookInput, FieldError, FieldErrorKind};
pub use catalog::{Action, CatalogView, EditSelection, Feedback, FeedbackKind};
