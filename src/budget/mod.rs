//! Monthly spending targets for expense categories.
//!
//! This module contains:
//! - The `Budget` model and validation of new budgets
//! - Database functions for storing and listing budgets
//! - The budgets page, the form endpoint and the JSON API

mod api;
mod core;
mod create_endpoint;
mod db;
mod page;

pub use api::{create_budget_api, list_budgets_api};
pub use core::{Budget, BudgetDraft, NewBudget, budgets_in_period, ensure_unique};
pub use create_endpoint::create_budget_endpoint;
pub use db::{create_budget_table, get_all_budgets, insert_budget};
pub use page::get_budgets_page;
