//! Dashboard module
//!
//! Provides the financial overview page: summary cards and the transactions
//! of the selected month, charts over all months, and the form for adding a
//! transaction.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
