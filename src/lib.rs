//! BudgetTracker is a web app for tracking income and expenses against
//! monthly budgets.
//!
//! This library provides the HTML pages, the HTMX form endpoints and a JSON
//! API, all served from one router. Records are kept in a SQLite database or,
//! for demos, in memory.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod budget;
mod category;
mod currency;
mod dashboard;
mod data_source;
mod database_id;
mod date_format;
mod db;
mod endpoints;
mod error;
mod fixture;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod period;
mod routing;
mod selectors;
mod timezone;
mod transaction;
mod view_state;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget::{NewBudget, insert_budget};
pub use category::{CategoryCatalog, default_categories};
pub use currency::Currency;
pub use data_source::{DataSource, DataSourceKind, FixtureDataSource, SqliteDataSource};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use fixture::{DEMO_MONTHS, demo_budgets, demo_transactions};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use timezone::get_local_offset;
pub use transaction::{NewTransaction, count_transactions, insert_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
