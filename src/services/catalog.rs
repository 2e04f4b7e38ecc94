//! Catalog management service
//!
//! Interprets one action per request against the book store, keeps the
//! caller's edit selection consistent with what is stored, and always answers
//! with a freshly re-read listing.

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInput, FieldError},
        catalog::{Action, CatalogView, EditSelection, Feedback},
    },
    repository::Repository,
    services::validation::FieldValidator,
};

const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Feedback and field errors produced by a single action
#[derive(Default)]
struct Outcome {
    feedback: Option<Feedback>,
    errors: Vec<FieldError>,
}

impl Outcome {
    fn silent() -> Self {
        Self::default()
    }

    fn success(text: String) -> Self {
        Self {
            feedback: Some(Feedback::success(text)),
            errors: Vec::new(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            feedback: Some(Feedback::error(text)),
            errors: Vec::new(),
        }
    }

    fn rejected(text: &str, errors: Vec<FieldError>) -> Self {
        Self {
            feedback: Some(Feedback::error(text)),
            errors,
        }
    }

    fn not_found(id: i32) -> Self {
        Self::error(format!("Book {} not found.", id))
    }
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    validator: FieldValidator,
}

impl CatalogService {
    pub fn new(repository: Repository, validator: FieldValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    /// Check that the book store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository
            .books
            .list()
            .await
            .map(|_| ())
            .map_err(|e| AppError::Unavailable(e.to_string()))
    }

    /// Run one action, updating `selection` in place.
    ///
    /// Validation failures, missing records and storage failures of the action
    /// itself come back as feedback; only a failure to re-read the listing is
    /// returned as an error.
    pub async fn handle(
        &self,
        selection: &mut EditSelection,
        action: Action,
    ) -> AppResult<CatalogView> {
        let outcome = match action {
            Action::View => Outcome::silent(),
            Action::Add(input) => self.add(&input).await,
            Action::SelectForEdit(id) => self.select_for_edit(selection, id).await,
            Action::Update(input) => self.update(selection, &input).await,
            Action::CancelEdit => {
                if let Some(id) = selection.current() {
                    tracing::debug!("Cancelled editing of book {}", id);
                }
                selection.clear();
                Outcome::silent()
            }
            Action::Delete(id) => self.delete(selection, id).await,
        };

        let records = self.repository.books.list().await?;

        let selected = match selection.current() {
            Some(id) => {
                let selected = records.iter().find(|book| book.id == id).cloned();
                if selected.is_none() {
                    tracing::debug!("Selected book {} is no longer listed, clearing selection", id);
                    selection.clear();
                }
                selected
            }
            None => None,
        };

        Ok(CatalogView {
            records,
            selected_id: *selection,
            selected,
            feedback: outcome.feedback,
            errors: outcome.errors,
        })
    }

    async fn add(&self, input: &BookInput) -> Outcome {
        let data = match self.validator.validate(input) {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!("Rejected new book: {} invalid field(s)", errors.len());
                return Outcome::rejected(
                    "Error adding book. Please check the form for errors.",
                    errors,
                );
            }
        };

        match self.repository.books.create(&data).await {
            Ok(book) => {
                tracing::info!("Added book {}: {}", book.id, book);
                Outcome::success(format!("Book \"{}\" added successfully!", book.name))
            }
            Err(e) => failure("add", e),
        }
    }

    async fn select_for_edit(&self, selection: &mut EditSelection, id: i32) -> Outcome {
        match self.repository.books.get(id).await {
            Ok(book) => {
                tracing::debug!("Selected book {} for editing: {}", id, book);
                selection.select(id);
                Outcome::silent()
            }
            Err(AppError::NotFound(_)) => {
                tracing::warn!("Cannot edit book {}: not found", id);
                Outcome::not_found(id)
            }
            Err(e) => failure("select", e),
        }
    }

    async fn update(&self, selection: &mut EditSelection, input: &BookInput) -> Outcome {
        let Some(id) = selection.current() else {
            return Outcome::error("No book is selected for editing.");
        };

        // The selection may have outlived its record
        match self.repository.books.get(id).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => return lost_selection(selection, id),
            Err(e) => return failure("update", e),
        }

        let data = match self.validator.validate(input) {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!(
                    "Rejected update of book {}: {} invalid field(s)",
                    id,
                    errors.len()
                );
                return Outcome::rejected(
                    "Error updating book. Please check the form for errors.",
                    errors,
                );
            }
        };

        match self.repository.books.update(id, &data).await {
            Ok(book) => {
                tracing::info!("Updated book {}: {}", book.id, book);
                selection.clear();
                Outcome::success(format!("Book \"{}\" updated successfully!", book.name))
            }
            Err(AppError::NotFound(_)) => lost_selection(selection, id),
            Err(e) => failure("update", e),
        }
    }

    async fn delete(&self, selection: &mut EditSelection, id: i32) -> Outcome {
        let book: Book = match self.repository.books.get(id).await {
            Ok(book) => book,
            Err(AppError::NotFound(_)) => return lost_record(selection, id),
            Err(e) => return failure("delete", e),
        };

        match self.repository.books.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted book {}: {}", id, book);
                if selection.current() == Some(id) {
                    selection.clear();
                }
                Outcome::success(format!("Book \"{}\" deleted successfully!", book.name))
            }
            Err(AppError::NotFound(_)) => lost_record(selection, id),
            Err(e) => failure("delete", e),
        }
    }
}

/// The selected record disappeared before it could be updated
fn lost_selection(selection: &mut EditSelection, id: i32) -> Outcome {
    tracing::warn!("Cannot update book {}: not found, leaving edit mode", id);
    selection.clear();
    Outcome::not_found(id)
}

/// The record disappeared before it could be deleted
fn lost_record(selection: &mut EditSelection, id: i32) -> Outcome {
    tracing::warn!("Cannot delete book {}: not found", id);
    if selection.current() == Some(id) {
        selection.clear();
    }
    Outcome::not_found(id)
}

fn failure(action: &str, error: AppError) -> Outcome {
    tracing::error!("Catalog {} failed: {}", action, error);
    Outcome::error(GENERIC_FAILURE)
}
