//! JSON endpoints for listing and creating transactions.

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
    category::{CategoryId, SubcategoryId},
    data_source::DataSource,
    date_format::parse_date,
    timezone::today_in,
    transaction::{TransactionDraft, TransactionKind, non_empty},
};

/// The state needed by the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionsApiState {
    pub data_source: Arc<dyn DataSource>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// An amount given either as a JSON number or as a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// The amount as text so that numbers and strings go through the same validation.
    pub fn into_text(self) -> String {
        match self {
            AmountInput::Number(amount) => amount.to_string(),
            AmountInput::Text(text) => text,
        }
    }
}

/// The body of a request to create a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub amount: AmountInput,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp, defaults to today.
    pub date: Option<String>,
}

/// List all transactions, newest first.
pub async fn list_transactions_api(State(state): State<TransactionsApiState>) -> Response {
    match state.data_source.list_transactions() {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_json_response("Failed to fetch transactions"),
    }
}

/// Validate and store a new transaction, responding with the created record.
pub async fn create_transaction_api(
    State(state): State<TransactionsApiState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    const FAILURE_MESSAGE: &str = "Failed to add transaction";

    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return Error::InvalidRequestBody(rejection.body_text())
                .into_json_response(FAILURE_MESSAGE);
        }
    };

    let draft = match draft_from_payload(payload, &state.local_timezone) {
        Ok(draft) => draft,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let result = state
        .data_source
        .catalog()
        .and_then(|catalog| draft.validate(&catalog))
        .and_then(|transaction| state.data_source.create_transaction(transaction));

    match result {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

fn draft_from_payload(
    payload: TransactionPayload,
    local_timezone: &str,
) -> Result<TransactionDraft, Error> {
    let date = match non_empty(payload.date) {
        Some(date) => parse_date(&date, local_timezone)?,
        None => today_in(local_timezone)?,
    };

    Ok(TransactionDraft {
        amount: payload.amount.into_text(),
        description: payload.description,
        kind: payload.kind.parse::<TransactionKind>()?,
        category_id: non_empty(payload.category_id).map(|id| CategoryId::new(&id)),
        subcategory_id: non_empty(payload.subcategory_id).map(|id| SubcategoryId::new(&id)),
        date,
    })
}
