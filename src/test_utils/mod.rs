#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

use std::sync::Arc;

use rusqlite::Connection;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok, parse_json};

use crate::{
    AppState, Error,
    budget::{Budget, NewBudget},
    category::Category,
    currency::Currency,
    data_source::{DataSource, SqliteDataSource},
    transaction::{NewTransaction, Transaction},
};

/// An [AppState] backed by an empty in-memory SQLite database with the
/// default categories.
pub(crate) fn get_test_app_state() -> AppState {
    let data_source = SqliteDataSource::new(
        Connection::open_in_memory().expect("Could not open in-memory database"),
    )
    .expect("Could not initialize database");

    app_state_with(Arc::new(data_source))
}

pub(crate) fn app_state_with(data_source: Arc<dyn DataSource>) -> AppState {
    AppState::new(data_source, "Etc/UTC", Currency::Zar)
}

/// A data source where every call fails, for testing error paths.
#[derive(Debug)]
pub(crate) struct FailingDataSource;

impl DataSource for FailingDataSource {
    fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn create_transaction(&self, _: NewTransaction) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn create_budget(&self, _: NewBudget) -> Result<Budget, Error> {
        Err(Error::DatabaseLockError)
    }
}
