//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::{currency::Currency, data_source::DataSource};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where transactions, budgets and categories are stored.
    pub data_source: Arc<dyn DataSource>,

    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,

    /// The currency used when a page request does not choose one.
    pub default_currency: Currency,
}

impl AppState {
    /// Create a new [AppState] serving data from `data_source`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Africa/Johannesburg".
    pub fn new(
        data_source: Arc<dyn DataSource>,
        local_timezone: &str,
        default_currency: Currency,
    ) -> Self {
        Self {
            data_source,
            local_timezone: local_timezone.to_owned(),
            default_currency,
        }
    }
}
