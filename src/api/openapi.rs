//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{catalog, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshop API",
        version = "1.0.0",
        description = "Book catalog management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::fetch_view,
        catalog::submit_action,
    ),
    components(
        schemas(
            // Catalog
            catalog::CatalogQuery,
            catalog::ActionKind,
            catalog::SubmitAction,
            crate::models::book::Book,
            crate::models::book::BookInput,
            crate::models::book::BookField,
            crate::models::book::FieldErrorKind,
            crate::models::book::FieldError,
            crate::models::catalog::EditSelection,
            crate::models::catalog::FeedbackKind,
            crate::models::catalog::Feedback,
            crate::models::catalog::CatalogView,
            // Health
            health::HealthResponse,
            crate::config::StoreBackend,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
