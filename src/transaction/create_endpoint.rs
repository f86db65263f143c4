//! Defines the endpoint for creating a new transaction from the dashboard form.
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
    AppState, Error,
    category::{CategoryId, SubcategoryId},
    currency::Currency,
    data_source::DataSource,
    date_format::parse_date,
    endpoints,
    timezone::today_in,
    transaction::{TransactionDraft, TransactionKind, non_empty},
    view_state::{ViewState, empty_as_none},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub data_source: Arc<dyn DataSource>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,
    pub default_currency: Currency,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
            local_timezone: state.local_timezone.clone(),
            default_currency: state.default_currency,
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The amount as typed, validated by [TransactionDraft::validate].
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub subcategory_id: Option<String>,
    /// The date as `YYYY-MM-DD`, defaults to today.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date: Option<String>,
    /// The currency the dashboard was showing, kept after the redirect.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub currency: Option<Currency>,
}

/// A route handler for creating a new transaction.
///
/// Redirects to the dashboard for the month of the new transaction on
/// success, otherwise responds with an alert.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let currency = form.currency.unwrap_or(state.default_currency);

    let date = match non_empty(form.date) {
        Some(date) => parse_date(&date, &state.local_timezone),
        None => today_in(&state.local_timezone),
    };

    let draft = date.map(|date| TransactionDraft {
        amount: form.amount,
        description: form.description,
        kind: form.kind,
        category_id: non_empty(form.category_id).map(|id| CategoryId::new(&id)),
        subcategory_id: non_empty(form.subcategory_id).map(|id| SubcategoryId::new(&id)),
        date,
    });

    let result = draft.and_then(|draft| {
        let catalog = state.data_source.catalog()?;
        let transaction = draft.validate(&catalog)?;

        state.data_source.create_transaction(transaction)
    });

    let transaction = match result {
        Ok(transaction) => transaction,
        Err(error) => {
            if !error.is_validation_error() {
                tracing::error!("could not create transaction: {error}");
            }

            return error.into_alert_response();
        }
    };

    let view = ViewState {
        period: transaction.period(),
        currency,
        show_form: false,
    };

    (
        HxRedirect(view.url(endpoints::DASHBOARD_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
