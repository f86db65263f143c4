//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    aggregation::Totals,
    currency::{Currency, format_currency},
    html::CARD_STYLE,
};

struct SummaryCard {
    id: &'static str,
    title: &'static str,
    amount: f64,
    style: &'static str,
}

/// Cards for the balance, income and expenses of the selected month.
pub(super) fn summary_cards_view(totals: Totals, currency: Currency) -> Markup {
    let balance = totals.balance();
    let balance_style = if balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    };

    let cards = [
        SummaryCard {
            id: "balance-card",
            title: "Current Balance",
            amount: balance,
            style: balance_style,
        },
        SummaryCard {
            id: "income-card",
            title: "Total Income",
            amount: totals.income,
            style: "text-green-600 dark:text-green-400",
        },
        SummaryCard {
            id: "expense-card",
            title: "Total Expenses",
            amount: totals.expense,
            style: "text-red-600 dark:text-red-400",
        },
    ];

    html! {
        section id="summary-cards" class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-6"
        {
            @for card in cards {
                div id=(card.id) class=(CARD_STYLE)
                {
                    h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (card.title) }

                    p class={ "mt-2 text-2xl font-bold " (card.style) }
                    {
                        (format_currency(card.amount, currency))
                    }
                }
            }
        }
    }
}
