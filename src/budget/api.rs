//! JSON endpoints for listing and creating budgets.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::BudgetDraft,
    category::CategoryId,
    data_source::DataSource,
    period::Period,
    transaction::{AmountInput, non_empty},
};

/// The state needed by the budget API.
#[derive(Debug, Clone)]
pub struct BudgetsApiState {
    pub data_source: Arc<dyn DataSource>,
}

impl FromRef<AppState> for BudgetsApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
        }
    }
}

/// The body of a request to create a budget.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPayload {
    pub category_id: Option<String>,
    pub amount: AmountInput,
    /// Zero-based, January is 0.
    pub month: u8,
    pub year: i32,
}

/// List all budgets, newest month first.
pub async fn list_budgets_api(State(state): State<BudgetsApiState>) -> Response {
    match state.data_source.list_budgets() {
        Ok(budgets) => Json(budgets).into_response(),
        Err(error) => error.into_json_response("Failed to fetch budgets"),
    }
}

/// Validate and store a new budget, responding with the created record.
///
/// Unlike the budget form, the API does not reject a second budget for the
/// same category and month.
pub async fn create_budget_api(
    State(state): State<BudgetsApiState>,
    payload: Result<Json<BudgetPayload>, JsonRejection>,
) -> Response {
    const FAILURE_MESSAGE: &str = "Failed to add budget";

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return Error::InvalidRequestBody(rejection.body_text())
                .into_json_response(FAILURE_MESSAGE);
        }
    };

    let result = Period::new(payload.year, payload.month)
        .map(|period| BudgetDraft {
            category_id: non_empty(payload.category_id).map(|id| CategoryId::new(&id)),
            amount: payload.amount.into_text(),
            period,
        })
        .and_then(|draft| {
            let catalog = state.data_source.catalog()?;
            draft.validate(&catalog)
        })
        .and_then(|budget| state.data_source.create_budget(budget));

    match result {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}
