//! Dropdowns for choosing the month and the display currency of a page.
//!
//! Options are plain links to the same page with the updated view state, so
//! selecting one reloads the page with the new query string.

use maud::{Markup, html};
use time::Date;

use crate::{
    currency::Currency,
    period::{Period, SELECTABLE_MONTHS},
    view_state::{ViewAction, ViewState},
};

const DROPDOWN_SUMMARY_STYLE: &str = "list-none [&::-webkit-details-marker]:hidden \
    flex items-center gap-2 py-2 px-4 text-sm font-medium text-gray-900 bg-white \
    rounded border border-gray-200 cursor-pointer hover:bg-gray-100 \
    dark:bg-gray-800 dark:text-gray-200 dark:border-gray-600 dark:hover:bg-gray-700";

const DROPDOWN_MENU_STYLE: &str = "absolute right-0 z-20 mt-2 w-56 max-h-64 \
    overflow-y-auto rounded-lg border border-gray-200 bg-white p-2 shadow-xl \
    dark:border-gray-700 dark:bg-gray-800";

fn dropdown_item_style(is_selected: bool) -> &'static str {
    if is_selected {
        "block rounded px-3 py-2 text-sm bg-blue-50 text-blue-700 \
        dark:bg-blue-900/30 dark:text-blue-200"
    } else {
        "block rounded px-3 py-2 text-sm text-gray-700 hover:bg-gray-100 \
        hover:text-blue-700 dark:text-gray-200 dark:hover:bg-gray-700"
    }
}

/// A dropdown of the last twelve months, newest first, ending at the month of `today`.
pub fn month_selector(view: &ViewState, endpoint: &str, today: Date) -> Markup {
    let options = Period::recent(today, SELECTABLE_MONTHS);

    html! {
        details id="month-selector" class="relative"
        {
            summary class=(DROPDOWN_SUMMARY_STYLE)
            {
                span { (view.period) }
                span aria-hidden="true" { "▾" }
            }

            ul class=(DROPDOWN_MENU_STYLE)
            {
                @for period in options {
                    li {
                        a
                            href=(view.dispatch(ViewAction::SelectPeriod(period)).url(endpoint))
                            class=(dropdown_item_style(period == view.period))
                            aria-current=[(period == view.period).then_some("true")]
                        {
                            (period)
                        }
                    }
                }
            }
        }
    }
}

/// A dropdown for choosing the currency amounts are shown in.
pub fn currency_selector(view: &ViewState, endpoint: &str) -> Markup {
    html! {
        details id="currency-selector" class="relative"
        {
            summary class=(DROPDOWN_SUMMARY_STYLE)
            {
                span { (view.currency.code()) }
                span aria-hidden="true" { "▾" }
            }

            ul class=(DROPDOWN_MENU_STYLE)
            {
                @for currency in Currency::ALL {
                    li {
                        a
                            href=(view.dispatch(ViewAction::SelectCurrency(currency)).url(endpoint))
                            class=(dropdown_item_style(currency == view.currency))
                            aria-current=[(currency == view.currency).then_some("true")]
                        {
                            (currency.code()) " (" (currency.name()) ")"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        currency::Currency,
        endpoints,
        period::Period,
        selectors::{currency_selector, month_selector},
        view_state::ViewState,
    };

    fn view() -> ViewState {
        ViewState {
            period: Period::new(2024, 1).unwrap(),
            currency: Currency::Zar,
            show_form: false,
        }
    }

    fn links(html: &Html) -> Vec<(String, String)> {
        html.select(&Selector::parse("li a").unwrap())
            .map(|link| {
                (
                    link.text().collect::<String>(),
                    link.value().attr("href").unwrap().to_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn month_selector_lists_last_twelve_months_newest_first() {
        let html = Html::parse_fragment(
            &month_selector(&view(), endpoints::DASHBOARD_VIEW, date!(2024 - 03 - 10)).into_string(),
        );

        let links = links(&html);

        assert_eq!(links.len(), 12);
        assert_eq!(
            links[0],
            (
                "March 2024".to_owned(),
                "/dashboard?month=2&year=2024&currency=ZAR".to_owned()
            )
        );
        assert_eq!(links[11].0, "April 2023");
    }

    #[test]
    fn month_selector_marks_selected_month() {
        let html = Html::parse_fragment(
            &month_selector(&view(), endpoints::BUDGETS_VIEW, date!(2024 - 03 - 10)).into_string(),
        );

        let selected: Vec<String> = html
            .select(&Selector::parse("a[aria-current]").unwrap())
            .map(|link| link.text().collect())
            .collect();

        assert_eq!(selected, vec!["February 2024"]);
    }

    #[test]
    fn currency_selector_keeps_selected_month() {
        let html = Html::parse_fragment(
            &currency_selector(&view(), endpoints::DASHBOARD_VIEW).into_string(),
        );

        assert_eq!(
            links(&html),
            vec![
                (
                    "ZAR (South African Rand)".to_owned(),
                    "/dashboard?month=1&year=2024&currency=ZAR".to_owned()
                ),
                (
                    "INR (Indian Rupee)".to_owned(),
                    "/dashboard?month=1&year=2024&currency=INR".to_owned()
                ),
            ]
        );
    }
}
