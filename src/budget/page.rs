//! The budgets page: the budgets of the selected month with how much of each
//! has been spent, and a form for adding a budget.

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
        BudgetUtilization, amount_for_category, category_breakdown, compare_budget,
        filter_by_period,
    },
    alert::Alert,
    budget::{Budget, budgets_in_period},
    category::CategoryCatalog,
    currency::{Currency, format_currency},
    data_source::DataSource,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base, loading_spinner, page_header,
    },
    navigation::NavBar,
    period::Period,
    selectors::{currency_selector, month_selector},
    timezone::today_in,
    transaction::{Transaction, TransactionKind},
    view_state::{ViewAction, ViewQuery, ViewState},
};

/// The state needed for displaying the budgets page.
#[derive(Debug, Clone)]
pub struct BudgetsPageState {
    pub data_source: Arc<dyn DataSource>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Johannesburg".
    pub local_timezone: String,
    pub default_currency: Currency,
}

impl FromRef<AppState> for BudgetsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
            local_timezone: state.local_timezone.clone(),
            default_currency: state.default_currency,
        }
    }
}

/// A budget with the amount spent against it in its month.
struct BudgetProgress<'a> {
    budget: &'a Budget,
    category_name: &'a str,
    spent: f64,
    utilization: BudgetUtilization,
}

/// Display the budgets for the month selected in the query string.
///
/// If the records cannot be loaded, the page is still rendered with a
/// warning in place of the missing data.
pub async fn get_budgets_page(
    State(state): State<BudgetsPageState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, Error> {
    let today = today_in(&state.local_timezone)?;
    let view = ViewState::from_query(query, today, state.default_currency);

    let mut warnings = Vec::new();

    let catalog = state.data_source.catalog().unwrap_or_else(|error| {
        tracing::error!("could not get categories: {error}");
        warnings.push(load_warning("categories"));
        CategoryCatalog::default()
    });

    let budgets = state.data_source.list_budgets().unwrap_or_else(|error| {
        tracing::error!("could not get budgets: {error}");
        warnings.push(load_warning("budgets"));
        Vec::new()
    });

    let transactions = state.data_source.list_transactions().unwrap_or_else(|error| {
        tracing::error!("could not get transactions: {error}");
        warnings.push(load_warning("transactions"));
        Vec::new()
    });

    let progress = budget_progress(&budgets, &transactions, &catalog, view.period);

    Ok(budgets_view(&view, today, &catalog, &progress, warnings).into_response())
}

fn load_warning(what: &str) -> Alert {
    Alert::Warning {
        message: format!("Could not load {what}"),
        details: "Some information on this page may be missing. Try reloading the page."
            .to_owned(),
    }
}

fn budget_progress<'a>(
    budgets: &'a [Budget],
    transactions: &[Transaction],
    catalog: &'a CategoryCatalog,
    period: Period,
) -> Vec<BudgetProgress<'a>> {
    let spending = category_breakdown(filter_by_period(transactions, period));

    budgets_in_period(budgets, period)
        .into_iter()
        .map(|budget| {
            let spent = amount_for_category(&spending, &budget.category_id);

            BudgetProgress {
                budget,
                category_name: catalog.category_name(&budget.category_id),
                spent,
                utilization: compare_budget(budget.amount, spent),
            }
        })
        .collect()
}

fn budgets_view(
    view: &ViewState,
    today: Date,
    catalog: &CategoryCatalog,
    progress: &[BudgetProgress],
    warnings: Vec<Alert>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html(view);
    let (toggle_label, list_span) = if view.show_form {
        ("Close Form", "lg:col-span-2")
    } else {
        ("Add Budget", "lg:col-span-3")
    };

    let controls = html! {
        (month_selector(view, endpoints::BUDGETS_VIEW, today))
        (currency_selector(view, endpoints::BUDGETS_VIEW))

        a
            id="toggle-form"
            href=(view.dispatch(ViewAction::ToggleForm).url(endpoints::BUDGETS_VIEW))
            class=(BUTTON_SECONDARY_STYLE)
        {
            (toggle_label)
        }
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Monthly Budgets", &controls))

            @for warning in warnings {
                (warning.into_html())
            }

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6 w-full"
            {
                div class=(list_span)
                {
                    (budget_list(progress, view.currency))
                }

                @if view.show_form {
                    (budget_form(view, catalog))
                }
            }
        }
    };

    base("Budgets", &[], &content)
}

fn budget_list(progress: &[BudgetProgress], currency: Currency) -> Markup {
    if progress.is_empty() {
        return html! {
            section id="budget-list" class=(CARD_STYLE)
            {
                p class="text-center text-gray-500 dark:text-gray-400"
                {
                    "No budgets set for this month."
                }
            }
        };
    }

    html! {
        section id="budget-list" class=(CARD_STYLE)
        {
            h3 class="text-lg font-medium mb-4" { "Monthly Budgets" }

            ul class="space-y-4"
            {
                @for item in progress {
                    (budget_item(item, currency))
                }
            }
        }
    }
}

fn budget_item(item: &BudgetProgress, currency: Currency) -> Markup {
    let BudgetUtilization {
        percentage,
        is_over_budget,
    } = item.utilization;

    let (amount_style, bar_style) = if is_over_budget {
        ("text-red-600 dark:text-red-400 font-medium", "bg-red-600")
    } else {
        ("", "bg-blue-600")
    };

    html! {
        li
            class="border border-gray-200 dark:border-gray-700 rounded-lg p-4"
            data-budget-id=(item.budget.id)
        {
            div class="flex justify-between items-center mb-2"
            {
                h4 class="font-medium" { (item.category_name) }

                span class=(amount_style)
                {
                    (format_currency(item.spent, currency))
                    " / "
                    (format_currency(item.budget.amount, currency))
                }
            }

            div
                class="w-full h-2 rounded-full bg-gray-200 dark:bg-gray-700"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=(percentage)
            {
                div class={ "h-2 rounded-full " (bar_style) } style={ "width: " (percentage) "%" } {}
            }

            p class="text-sm text-right mt-1 text-gray-500 dark:text-gray-400"
            {
                (percentage) "% "
                @if is_over_budget { "Over budget!" } @else { "used" }
            }
        }
    }
}

/// The form for adding a budget for the month shown in `view`.
fn budget_form(view: &ViewState, catalog: &CategoryCatalog) -> Markup {
    html! {
        section id="budget-form" class=(CARD_STYLE)
        {
            h3 class="text-lg font-medium mb-4" { "Add Budget for " (view.period) }

            form
                hx-post=(endpoints::BUDGETS)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="space-y-4"
            {
                input type="hidden" name="month" value=(view.period.month());
                input type="hidden" name="year" value=(view.period.year());
                input type="hidden" name="currency" value=(view.currency.code());

                div
                {
                    label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category_id"
                        id="category_id"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected { "Select a category" }

                        @for category in catalog.of_kind(TransactionKind::Expense) {
                            option value=(category.id) { (category.name) }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Budget Amount" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Add Budget"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        response::Response,
    };
    use scraper::{Html, Selector};
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        budget::{
            Budget,
            page::{BudgetsPageState, get_budgets_page},
        },
        category::{CategoryCatalog, CategoryId, SubcategoryId, default_categories},
        currency::Currency,
        data_source::{DataSource, FixtureDataSource},
        endpoints,
        period::Period,
        test_utils::{
            FailingDataSource, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document,
        },
        transaction::{Transaction, TransactionKind},
        view_state::ViewQuery,
    };

    fn state_with(data_source: Arc<dyn DataSource>) -> BudgetsPageState {
        BudgetsPageState {
            data_source,
            local_timezone: "Etc/UTC".to_owned(),
            default_currency: Currency::Zar,
        }
    }

    fn expense(id: i64, category: &str, subcategory: &str, amount: f64, date: Date) -> Transaction {
        Transaction {
            id,
            amount,
            description: "Test".to_owned(),
            kind: TransactionKind::Expense,
            category_id: CategoryId::new(category),
            subcategory_id: SubcategoryId::new(subcategory),
            date,
        }
    }

    fn budget(id: i64, category: &str, amount: f64, period: Period) -> Budget {
        Budget {
            id,
            category_id: CategoryId::new(category),
            amount,
            period,
        }
    }

    fn january_query() -> ViewQuery {
        ViewQuery {
            month: Some(0),
            year: Some(2024),
            ..Default::default()
        }
    }

    fn january_state() -> BudgetsPageState {
        let january = Period::new(2024, 0).unwrap();
        let data_source = FixtureDataSource::with_records(
            CategoryCatalog::new(default_categories()),
            vec![
                expense(1, "cat_food", "sub_groceries", 1500.0, date!(2024 - 01 - 10)),
                expense(2, "cat_transport", "sub_fuel", 900.0, date!(2024 - 01 - 12)),
                // Outside of the selected month.
                expense(3, "cat_food", "sub_groceries", 5000.0, date!(2023 - 12 - 30)),
            ],
            vec![
                budget(1, "cat_food", 3000.0, january),
                budget(2, "cat_transport", 600.0, january),
                budget(3, "cat_housing", 8000.0, Period::new(2023, 11).unwrap()),
            ],
        );

        state_with(Arc::new(data_source))
    }

    async fn render(state: BudgetsPageState, query: ViewQuery) -> Html {
        let response: Response = get_budgets_page(State(state), Query(query)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn texts(html: &Html, selector: &str) -> Vec<String> {
        html.select(&Selector::parse(selector).unwrap())
            .map(|element| {
                element
                    .text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[tokio::test]
    async fn shows_spending_against_budgets_of_selected_month() {
        let html = render(january_state(), january_query()).await;

        // Budgets are listed newest first.
        assert_eq!(
            texts(&html, "#budget-list h4"),
            vec!["Transportation", "Food"]
        );
        assert_eq!(
            texts(&html, "#budget-list li span"),
            vec!["R 900.00 / R 600.00", "R 1,500.00 / R 3,000.00"]
        );
        assert_eq!(
            texts(&html, "#budget-list li p"),
            vec!["100% Over budget!", "50% used"]
        );
    }

    #[tokio::test]
    async fn shows_empty_state_for_month_without_budgets() {
        let query = ViewQuery {
            month: Some(5),
            year: Some(2024),
            ..Default::default()
        };

        let html = render(january_state(), query).await;

        assert_eq!(
            texts(&html, "#budget-list p"),
            vec!["No budgets set for this month."]
        );
    }

    #[tokio::test]
    async fn form_is_hidden_until_toggled() {
        let closed = render(january_state(), january_query()).await;
        let open = render(
            january_state(),
            ViewQuery {
                form: true,
                ..january_query()
            },
        )
        .await;

        assert!(texts(&closed, "#budget-form").is_empty());
        assert_eq!(texts(&closed, "#toggle-form"), vec!["Add Budget"]);
        assert_eq!(texts(&open, "#toggle-form"), vec!["Close Form"]);
        assert_eq!(
            texts(&open, "#budget-form h3"),
            vec!["Add Budget for January 2024"]
        );
    }

    #[tokio::test]
    async fn form_posts_selected_month_and_offers_expense_categories() {
        let html = render(
            january_state(),
            ViewQuery {
                form: true,
                currency: Some(Currency::Inr),
                ..january_query()
            },
        )
        .await;

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::BUDGETS, "hx-post");
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button_with_text(&form, "Add Budget");

        let hidden: Vec<(String, String)> = form
            .select(&Selector::parse("input[type='hidden']").unwrap())
            .map(|input| {
                (
                    input.value().attr("name").unwrap().to_owned(),
                    input.value().attr("value").unwrap().to_owned(),
                )
            })
            .collect();
        assert_eq!(
            hidden,
            vec![
                ("month".to_owned(), "0".to_owned()),
                ("year".to_owned(), "2024".to_owned()),
                ("currency".to_owned(), "INR".to_owned()),
            ]
        );

        let options: Vec<String> = form
            .select(&Selector::parse("select[name='category_id'] option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .map(str::to_owned)
            .collect();
        assert!(options.contains(&"cat_food".to_owned()));
        assert!(!options.contains(&"cat_salary".to_owned()));
    }

    #[tokio::test]
    async fn defaults_to_current_month() {
        let html = render(january_state(), ViewQuery::default()).await;

        let current = Period::from_date(OffsetDateTime::now_utc().date());
        assert_eq!(
            texts(&html, "#month-selector summary span:first-child"),
            vec![current.to_string()]
        );
    }

    #[tokio::test]
    async fn renders_warning_when_records_cannot_be_loaded() {
        let html = render(state_with(Arc::new(FailingDataSource)), january_query()).await;

        let alerts = texts(&html, "[role='alert'] p.font-semibold");
        assert!(alerts.contains(&"Could not load budgets".to_owned()), "got {alerts:?}");
        assert_eq!(
            texts(&html, "#budget-list p"),
            vec!["No budgets set for this month."]
        );
    }
}
