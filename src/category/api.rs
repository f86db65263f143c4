//! JSON endpoint for the category catalog.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, data_source::DataSource};

/// The state needed to list categories.
#[derive(Debug, Clone)]
pub struct CategoriesApiState {
    pub data_source: Arc<dyn DataSource>,
}

impl FromRef<AppState> for CategoriesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
        }
    }
}

/// List all categories with their subcategories, ordered by name.
pub async fn list_categories_api(State(state): State<CategoriesApiState>) -> Response {
    match state.data_source.list_categories() {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_json_response("Failed to fetch categories"),
    }
}
