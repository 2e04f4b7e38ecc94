//! Catalog session state, actions and the view returned after each action

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::{Book, BookInput, FieldError};

/// The record (if any) currently selected for editing.
///
/// The caller carries this between requests; the catalog service receives
/// it as an explicit parameter and hands back the updated value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EditSelection(Option<i32>);

impl EditSelection {
    pub fn new(id: Option<i32>) -> Self {
        Self(id)
    }

    /// Select a record for editing, replacing any previous selection
    pub fn select(&mut self, id: i32) {
        self.0 = Some(id);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn current(&self) -> Option<i32> {
        self.0
    }

    pub fn is_editing(&self) -> bool {
        self.0.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Outcome notice for a single action, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

/// An action understood by the catalog service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the listing without changing anything
    View,
    Add(BookInput),
    SelectForEdit(i32),
    /// Update the currently selected record
    Update(BookInput),
    CancelEdit,
    Delete(i32),
}

/// Response bundle produced after every action
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogView {
    /// Full listing, re-read after the action
    pub records: Vec<Book>,
    /// Selection to carry into the next request
    pub selected_id: EditSelection,
    /// The selected record, for prefilling an edit form
    pub selected: Option<Book>,
    pub feedback: Option<Feedback>,
    /// Per-field validation errors of the last add or update
    pub errors: Vec<FieldError>,
}
