//! The endpoint URIs of the pages, form handlers and JSON API.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard with the balance cards, charts and the month's transactions.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing the budgets of a month with the form for adding budgets.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route the transaction form posts to.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the category and subcategory selects of the transaction form.
pub const CATEGORY_FIELDS: &str = "/transactions/category-fields";
/// The route the budget form posts to.
pub const BUDGETS: &str = "/budgets";

/// The route to list and create transactions as JSON.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to list and create budgets as JSON.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to list the category catalog as JSON.
pub const CATEGORIES_API: &str = "/api/categories";
