//! Defines the app level error type and conversions to rendered HTML pages, alerts and JSON.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    alert::Alert,
    category::{CategoryId, SubcategoryId},
    internal_server_error::InternalServerError,
    not_found::NotFoundError,
    period::Period,
    transaction::TransactionKind,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount of a transaction or budget was missing, not a number, or
    /// not greater than zero.
    #[error("amount must be a number greater than zero")]
    InvalidAmount,

    /// A transaction was submitted without a description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// A transaction or budget was submitted without choosing a category, or
    /// a transaction without a subcategory.
    #[error("a category and subcategory must be selected")]
    MissingCategory,

    /// The category ID does not refer to a category in the catalog.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(CategoryId),

    /// The subcategory ID is not one of the subcategories of the chosen category.
    #[error("\"{0}\" is not a subcategory of the selected category")]
    InvalidSubcategory(SubcategoryId),

    /// The transaction kind was not "income" or "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidKind(String),

    /// A transaction of one kind was filed under a category from the other pool.
    #[error("{category} cannot be used for {kind} transactions")]
    KindMismatch {
        /// The kind of the submitted transaction.
        kind: TransactionKind,
        /// The name of the category it was filed under.
        category: String,
    },

    /// Budgets can only be set for expense categories.
    #[error("budgets can only be set for expense categories, \"{0}\" is an income category")]
    IncomeCategoryBudget(CategoryId),

    /// A currency code other than "ZAR" or "INR".
    #[error("\"{0}\" is not a supported currency, expected \"ZAR\" or \"INR\"")]
    InvalidCurrency(String),

    /// A month outside of 0-11 (January-December).
    #[error("{0} is not a valid month, expected a number from 0 to 11")]
    InvalidMonth(u8),

    /// A date that is neither `YYYY-MM-DD` nor an RFC 3339 timestamp.
    #[error("could not parse the date \"{0}\"")]
    InvalidDate(String),

    /// The body of a JSON request could not be parsed.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// A budget for the category already exists in the selected month.
    #[error("a budget for {category} already exists for {period}")]
    DuplicateBudget {
        /// The name of the category.
        category: String,
        /// The month the budget is for.
        period: Period,
    },

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on the data source.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// Whether the error was caused by invalid user input rather than a
    /// failure on the server.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount
                | Error::EmptyDescription
                | Error::MissingCategory
                | Error::InvalidCategory(_)
                | Error::InvalidSubcategory(_)
                | Error::InvalidKind(_)
                | Error::KindMismatch { .. }
                | Error::IncomeCategoryBudget(_)
                | Error::InvalidCurrency(_)
                | Error::InvalidMonth(_)
                | Error::InvalidDate(_)
                | Error::InvalidRequestBody(_)
                | Error::DuplicateBudget { .. }
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: "Please enter a valid amount greater than 0.".to_owned(),
                },
            ),
            Error::EmptyDescription => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing description".to_owned(),
                    details: "Please enter a description for the transaction.".to_owned(),
                },
            ),
            Error::MissingCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing category".to_owned(),
                    details: "Please select a category and subcategory.".to_owned(),
                },
            ),
            Error::InvalidCategory(category_id) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category".to_owned(),
                    details: format!("Could not find a category with the ID \"{category_id}\"."),
                },
            ),
            Error::InvalidSubcategory(subcategory_id) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid subcategory".to_owned(),
                    details: format!(
                        "\"{subcategory_id}\" is not a subcategory of the selected category."
                    ),
                },
            ),
            Error::InvalidKind(kind) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transaction type".to_owned(),
                    details: format!("\"{kind}\" is not a valid type, choose income or expense."),
                },
            ),
            Error::KindMismatch { kind, category } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Category does not match type".to_owned(),
                    details: format!(
                        "{category} cannot be used for {kind} transactions. \
                        Choose a category from the {kind} categories."
                    ),
                },
            ),
            Error::IncomeCategoryBudget(category_id) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid budget category".to_owned(),
                    details: format!(
                        "\"{category_id}\" is an income category. \
                        Budgets can only be set for expense categories."
                    ),
                },
            ),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid month".to_owned(),
                    details: format!("{month} is not a valid month."),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid date".to_owned(),
                    details: format!("Could not read the date \"{date}\"."),
                },
            ),
            Error::DuplicateBudget { .. } => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Budget already exists".to_owned(),
                    details: "A budget for this category already exists for the selected month."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Convert the error into a JSON response of the form `{"error": "..."}`.
    ///
    /// Validation errors are reported with their own message and the status
    /// code 400. Any other error is logged and reported as a 500 with
    /// `failure_message`, e.g. "Failed to add transaction".
    pub fn into_json_response(self, failure_message: &str) -> Response {
        let (status_code, message) = match self {
            error if error.is_validation_error() => (StatusCode::BAD_REQUEST, error.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, Error::NotFound.to_string()),
            error => {
                tracing::error!("{failure_message}: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    failure_message.to_owned(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
