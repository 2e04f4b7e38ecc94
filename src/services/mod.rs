//! Business logic services

pub mod catalog;
pub mod validation;

use crate::{config::CatalogConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: &CatalogConfig) -> Self {
        let validator = validation::FieldValidator::new(catalog_config.max_name_length);
        Self {
            catalog: catalog::CatalogService::new(repository, validator),
        }
    }
}
