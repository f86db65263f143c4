//! Transactions: the income and expenses that everything else is computed from.
//!
//! This module contains:
//! - The `Transaction` model and the validation of new transactions
//! - Database functions for storing and listing transactions
//! - The JSON API, the dashboard form and its endpoint, and the transactions table

mod api;
mod core;
mod create_endpoint;
mod db;
mod form;
mod table;

pub use api::{AmountInput, create_transaction_api, list_transactions_api};
pub(crate) use core::non_empty;
pub use core::{NewTransaction, Transaction, TransactionDraft, TransactionKind, parse_amount};
pub use create_endpoint::create_transaction_endpoint;
pub use db::{
    count_transactions, create_transaction_table, get_all_transactions, insert_transaction,
};
pub use form::{get_category_fields, transaction_form};
pub use table::transactions_table;
