//! Defines the endpoint for creating a budget from the budgets page form.
use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState,
    budget::{BudgetDraft, ensure_unique},
    category::CategoryId,
    currency::Currency,
    data_source::DataSource,
    endpoints,
    period::Period,
    transaction::non_empty,
    view_state::{ViewState, empty_as_none},
};

/// The state needed to create a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetState {
    pub data_source: Arc<dyn DataSource>,
    pub default_currency: Currency,
}

impl FromRef<AppState> for CreateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
            default_currency: state.default_currency,
        }
    }
}

/// The form data for creating a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub amount: String,
    /// Zero-based month of the page the form was submitted from.
    pub month: u8,
    pub year: i32,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub currency: Option<Currency>,
}

/// A route handler for creating a budget for the month shown on the budgets page.
///
/// A second budget for the same category and month is rejected with a
/// conflict alert.
pub async fn create_budget_endpoint(
    State(state): State<CreateBudgetState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let currency = form.currency.unwrap_or(state.default_currency);

    let result = Period::new(form.year, form.month).and_then(|period| {
        let draft = BudgetDraft {
            category_id: non_empty(form.category_id).map(|id| CategoryId::new(&id)),
            amount: form.amount,
            period,
        };

        let catalog = state.data_source.catalog()?;
        let budget = draft.validate(&catalog)?;
        let existing = state.data_source.list_budgets()?;
        ensure_unique(&budget, &existing, &catalog)?;

        state.data_source.create_budget(budget)
    });

    let budget = match result {
        Ok(budget) => budget,
        Err(error) => {
            if !error.is_validation_error() {
                tracing::error!("could not create budget: {error}");
            }

            return error.into_alert_response();
        }
    };

    let view = ViewState {
        period: budget.period,
        currency,
        show_form: false,
    };

    (
        HxRedirect(view.url(endpoints::BUDGETS_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
