//! Catalog endpoints: fetch the view, submit an action

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{text_or_number, BookInput},
        catalog::{Action, CatalogView, EditSelection},
    },
};

/// Fetch view query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Book to select for editing
    pub edit: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Add,
    Update,
    Delete,
    CancelEdit,
}

/// Submit action request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAction {
    pub action: ActionKind,
    /// Target book (delete; update when no selection is carried)
    pub id: Option<i32>,
    /// Edit selection carried over from the previous response
    pub selected_id: Option<i32>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub edition: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,
}

impl SubmitAction {
    /// Split the request into the carried selection and the action to run
    pub fn into_action(self) -> AppResult<(EditSelection, Action)> {
        let input = BookInput::new(self.name, self.edition, self.price);
        let selection = EditSelection::new(self.selected_id);

        let action = match self.action {
            ActionKind::Add => Action::Add(input),
            ActionKind::Update => {
                return Ok((
                    EditSelection::new(self.selected_id.or(self.id)),
                    Action::Update(input),
                ));
            }
            ActionKind::Delete => {
                let id = self
                    .id
                    .ok_or_else(|| AppError::BadRequest("delete requires a book id".to_string()))?;
                Action::Delete(id)
            }
            ActionKind::CancelEdit => Action::CancelEdit,
        };
        Ok((selection, action))
    }
}

/// Fetch the catalog listing, optionally selecting a book for editing
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Catalog view", body = CatalogView)
    )
)]
pub async fn fetch_view(
    State(state): State<crate::AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<CatalogView>> {
    let action = match query.edit {
        Some(id) => Action::SelectForEdit(id),
        None => Action::View,
    };
    let mut selection = EditSelection::default();
    let view = state.services.catalog.handle(&mut selection, action).await?;
    Ok(Json(view))
}

/// Submit a catalog action (add, update, delete, cancel-edit)
#[utoipa::path(
    post,
    path = "/catalog",
    tag = "catalog",
    request_body = SubmitAction,
    responses(
        (status = 200, description = "Catalog view after the action", body = CatalogView),
        (status = 400, description = "Malformed action", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_action(
    State(state): State<crate::AppState>,
    Json(request): Json<SubmitAction>,
) -> AppResult<Json<CatalogView>> {
    let (mut selection, action) = request.into_action()?;
    let view = state.services.catalog.handle(&mut selection, action).await?;
    Ok(Json(view))
}
