//! Book model and the typed input/output of field validation

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Book record, as persisted in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    /// Title of the book
    pub name: String,
    /// Edition number (>= 1)
    pub edition: i32,
    /// Price, two fractional digits (> 0)
    pub price: Decimal,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Edition {})", self.name, self.edition)
    }
}

/// Normalized book fields, only ever produced by `FieldValidator`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub name: String,
    pub edition: i32,
    pub price: Decimal,
}

/// Raw book fields as submitted by a client.
///
/// Every field is kept as text so that unparseable values reach the
/// validator and come back as per-field errors instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookInput {
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub edition: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
}

impl BookInput {
    pub fn new(
        name: impl Into<String>,
        edition: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            edition: edition.into(),
            price: price.into(),
        }
    }
}

/// Accept a JSON string, number or null and keep it as text
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) => text,
        Some(Raw::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// Book field a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookField {
    Name,
    Edition,
    Price,
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookField::Name => write!(f, "name"),
            BookField::Edition => write!(f, "edition"),
            BookField::Price => write!(f, "price"),
        }
    }
}

/// Reason a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum FieldErrorKind {
    EmptyField,
    TooLong,
    InvalidNumber,
    OutOfRange,
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: BookField,
    pub kind: FieldErrorKind,
    /// Human readable explanation
    pub message: String,
}

impl FieldError {
    pub fn new(field: BookField, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}
