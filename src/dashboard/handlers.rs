//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state used by the handler

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{
        calculate_totals, category_series, filter_by_period, monthly_series, overview_series,
    },
    alert::Alert,
    category::CategoryCatalog,
    currency::Currency,
    dashboard::{
        cards::summary_cards_view,
        charts::{
            DashboardChart, ECHARTS_URL, charts_script, charts_view, expenses_by_category_chart,
            income_expense_chart,
        },
    },
    data_source::DataSource,
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, CARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, page_header,
    },
    navigation::NavBar,
    selectors::{currency_selector, month_selector},
    timezone::today_in,
    transaction::{Transaction, transaction_form, transactions_table},
    view_state::{ViewAction, ViewQuery, ViewState},
};

const INCOME_EXPENSE_CHART_TITLE: &str = "Income vs Expenses";
const CATEGORY_CHART_TITLE: &str = "Expenses by Category";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub data_source: Arc<dyn DataSource>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,
    pub default_currency: Currency,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
            local_timezone: state.local_timezone.clone(),
            default_currency: state.default_currency,
        }
    }
}

/// Display the financial overview for the month selected in the query string.
///
/// The cards and the table cover the selected month while the charts cover
/// every month with transactions. If the records cannot be loaded, the page
/// is rendered with a warning and without the missing data.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;
    let view = ViewState::from_query(query, today, state.default_currency);

    let mut warnings = Vec::new();

    let catalog = state.data_source.catalog().unwrap_or_else(|error| {
        tracing::error!("could not get categories: {error}");
        warnings.push(Alert::Warning {
            message: "Could not load categories".to_owned(),
            details: "Category names and the transaction form may be incomplete.".to_owned(),
        });
        CategoryCatalog::default()
    });

    let transactions = state.data_source.list_transactions().unwrap_or_else(|error| {
        tracing::error!("could not get transactions: {error}");
        warnings.push(Alert::Warning {
            message: "Could not load transactions".to_owned(),
            details: "The figures below may be incomplete. Try reloading the page.".to_owned(),
        });
        Vec::new()
    });

    let charts = build_dashboard_charts(&transactions, &catalog, view.currency);

    Ok(dashboard_view(&view, today, &catalog, &transactions, &charts, warnings).into_response())
}

/// Creates the dashboard charts from all transactions.
///
/// Returns no charts when there are no transactions to plot.
fn build_dashboard_charts(
    transactions: &[Transaction],
    catalog: &CategoryCatalog,
    currency: Currency,
) -> Vec<DashboardChart> {
    let series = monthly_series(transactions);

    if series.is_empty() {
        return Vec::new();
    }

    let overview = overview_series(&series);
    let categories = category_series(&series, catalog);

    vec![
        DashboardChart {
            id: "income-expense-chart",
            title: INCOME_EXPENSE_CHART_TITLE,
            options: income_expense_chart(&overview, currency).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            title: CATEGORY_CHART_TITLE,
            options: expenses_by_category_chart(&overview.labels, &categories, currency)
                .to_string(),
        },
    ]
}

fn dashboard_view(
    view: &ViewState,
    today: Date,
    catalog: &CategoryCatalog,
    transactions: &[Transaction],
    charts: &[DashboardChart],
    warnings: Vec<Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html(view);
    let toggle_label = if view.show_form {
        "Close Form"
    } else {
        "Add Transaction"
    };

    let month_transactions = filter_by_period(transactions, view.period);
    let totals = calculate_totals(month_transactions.iter().copied());

    let controls = html! {
        (month_selector(view, endpoints::DASHBOARD_VIEW, today))
        (currency_selector(view, endpoints::DASHBOARD_VIEW))

        a
            id="toggle-form"
            href=(view.dispatch(ViewAction::ToggleForm).url(endpoints::DASHBOARD_VIEW))
            class=(BUTTON_SECONDARY_STYLE)
        {
            (toggle_label)
        }
    };

    let content = html! {
        (nav_bar)

        div
            id="dashboard-content"
            class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl" }
        {
            (page_header("Financial Overview", &controls))

            @for warning in warnings {
                (warning.into_html())
            }

            @if view.show_form {
                div class="w-full mb-6" { (transaction_form(view, catalog, today)) }
            }

            (summary_cards_view(totals, view.currency))

            (charts_view(charts, &[INCOME_EXPENSE_CHART_TITLE, CATEGORY_CHART_TITLE]))

            section id="recent-transactions" class=(CARD_STYLE)
            {
                h3 class="text-lg font-medium mb-4" { "Recent Transactions" }

                (transactions_table(&month_transactions, catalog, view.currency))
            }
        }
    };

    let scripts = if charts.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
            charts_script(charts),
        ]
    };

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Query, State};
    use scraper::{Html, Selector};
    use time::{Date, macros::date};

    use crate::{
        category::{CategoryCatalog, CategoryId, SubcategoryId, default_categories},
        currency::Currency,
        dashboard::handlers::{DashboardState, get_dashboard_page},
        data_source::{DataSource, FixtureDataSource},
        endpoints,
        test_utils::{
            FailingDataSource, assert_form_input_with_value, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
        },
        transaction::{Transaction, TransactionKind},
        view_state::ViewQuery,
    };

    fn transaction(
        id: i64,
        kind: TransactionKind,
        category: &str,
        subcategory: &str,
        amount: f64,
        date: Date,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            description: format!("Transaction {id}"),
            kind,
            category_id: CategoryId::new(category),
            subcategory_id: SubcategoryId::new(subcategory),
            date,
        }
    }

    fn state_with(data_source: Arc<dyn DataSource>) -> DashboardState {
        DashboardState {
            data_source,
            local_timezone: "Etc/UTC".to_owned(),
            default_currency: Currency::Zar,
        }
    }

    fn sample_state() -> DashboardState {
        let data_source = FixtureDataSource::with_records(
            CategoryCatalog::new(default_categories()),
            vec![
                transaction(
                    1,
                    TransactionKind::Income,
                    "cat_salary",
                    "sub_primary",
                    20_000.0,
                    date!(2024 - 01 - 25),
                ),
                transaction(
                    2,
                    TransactionKind::Expense,
                    "cat_food",
                    "sub_groceries",
                    1_500.0,
                    date!(2024 - 01 - 10),
                ),
                transaction(
                    3,
                    TransactionKind::Expense,
                    "cat_transport",
                    "sub_fuel",
                    700.0,
                    date!(2023 - 12 - 05),
                ),
            ],
            Vec::new(),
        );

        state_with(Arc::new(data_source))
    }

    fn january(form: bool) -> ViewQuery {
        ViewQuery {
            month: Some(0),
            year: Some(2024),
            currency: None,
            form,
        }
    }

    async fn render(state: DashboardState, query: ViewQuery) -> Html {
        let response = get_dashboard_page(State(state), Query(query)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn texts(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn cards_summarise_selected_month() {
        let html = render(sample_state(), january(false)).await;

        assert_eq!(texts(&html, "#balance-card p"), vec!["R 18,500.00"]);
        assert_eq!(texts(&html, "#income-card p"), vec!["R 20,000.00"]);
        assert_eq!(texts(&html, "#expense-card p"), vec!["R 1,500.00"]);
    }

    #[tokio::test]
    async fn table_lists_only_selected_month() {
        let html = render(sample_state(), january(false)).await;

        assert_eq!(
            texts(&html, "#recent-transactions tbody tr td:nth-child(2)"),
            vec!["Transaction 1", "Transaction 2"]
        );
    }

    #[tokio::test]
    async fn charts_cover_all_months() {
        let html = render(sample_state(), january(false)).await;

        assert_eq!(
            texts(&html, "#charts h3"),
            vec!["Income vs Expenses", "Expenses by Category"]
        );
        assert!(texts(&html, ".chart-empty").is_empty());

        let scripts: String = texts(&html, "head script").concat();
        assert!(scripts.contains("income-expense-chart"));
        assert!(scripts.contains("Dec 2023"));
        assert!(scripts.contains("Jan 2024"));
    }

    #[tokio::test]
    async fn empty_store_shows_placeholders() {
        let data_source = FixtureDataSource::with_records(
            CategoryCatalog::new(default_categories()),
            Vec::new(),
            Vec::new(),
        );

        let html = render(state_with(Arc::new(data_source)), january(false)).await;

        assert_eq!(
            texts(&html, ".chart-empty"),
            vec!["No data available", "No data available"]
        );
        assert_eq!(texts(&html, "#balance-card p"), vec!["R 0.00"]);
        assert_eq!(
            texts(&html, "#recent-transactions tbody td"),
            vec!["No transactions found for the selected period."]
        );
    }

    #[tokio::test]
    async fn toggle_shows_transaction_form() {
        let closed = render(sample_state(), january(false)).await;
        let open = render(sample_state(), january(true)).await;

        assert_eq!(texts(&closed, "#toggle-form"), vec!["Add Transaction"]);
        assert!(texts(&closed, "#transaction-form").is_empty());
        assert_eq!(texts(&open, "#toggle-form"), vec!["Close Form"]);

        let form = must_get_form(&open);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS, "hx-post");
        let today = time::OffsetDateTime::now_utc().date();
        assert_form_input_with_value(&form, "date", "date", &today.to_string());
    }

    #[tokio::test]
    async fn currency_selection_changes_amounts() {
        let query = ViewQuery {
            currency: Some(Currency::Inr),
            ..january(false)
        };

        let html = render(sample_state(), query).await;

        assert_eq!(texts(&html, "#income-card p"), vec!["₹ 20,000.00"]);
    }

    #[tokio::test]
    async fn renders_warning_when_store_fails() {
        let html = render(state_with(Arc::new(FailingDataSource)), january(false)).await;

        let alerts = texts(&html, "[role='alert'] p.font-semibold");
        assert_eq!(
            alerts,
            vec!["Could not load categories", "Could not load transactions"]
        );
        assert_eq!(texts(&html, "#balance-card p"), vec!["R 0.00"]);
    }
}
