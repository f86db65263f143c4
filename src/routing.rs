//! Application router configuration for the pages, form endpoints and JSON API.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    budget::{create_budget_api, create_budget_endpoint, get_budgets_page, list_budgets_api},
    category::list_categories_api,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_api, create_transaction_endpoint, get_category_fields,
        list_transactions_api,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::BUDGETS_VIEW,
            get(get_budgets_page).post(create_budget_endpoint),
        )
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
        .route(endpoints::CATEGORY_FIELDS, get(get_category_fields))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_api).post(create_transaction_api),
        )
        .route(
            endpoints::BUDGETS_API,
            get(list_budgets_api).post(create_budget_api),
        )
        .route(endpoints::CATEGORIES_API, get(list_categories_api));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
