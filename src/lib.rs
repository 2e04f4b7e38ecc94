//! Bookshop catalog server
//!
//! A REST JSON API for keeping a small catalog of books (name, edition,
//! price) with validation, single-record edit selection and per-action
//! feedback.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state for a configuration and an already opened repository
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config.catalog);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
