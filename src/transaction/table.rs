//! Renders the table of transactions shown on the dashboard.

use maud::{Markup, html};
use time::{Date, macros::format_description};

use crate::{
    category::CategoryCatalog,
    currency::{Currency, format_currency},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    transaction::{Transaction, TransactionKind},
};

/// Format `date` for display, e.g. "Jan 5, 2024".
pub fn format_display_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|error| {
        tracing::error!("could not format date {date}: {error}");
        date.to_string()
    })
}

/// The amount with a sign showing whether money came in or went out,
/// e.g. "+ R 1,200.00".
pub fn signed_amount(transaction: &Transaction, currency: Currency) -> String {
    let sign = match transaction.kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };

    format!("{sign} {}", format_currency(transaction.amount, currency))
}

/// A table of `transactions` in the order given.
pub fn transactions_table(
    transactions: &[&Transaction],
    catalog: &CategoryCatalog,
    currency: Currency,
) -> Markup {
    html! {
        div class="relative overflow-x-auto rounded-lg"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Subcategory" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class={ (TABLE_CELL_STYLE) " font-medium whitespace-nowrap" }
                            {
                                (format_display_date(transaction.date))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.description) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                (catalog.category_name(&transaction.category_id))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                (catalog.subcategory_name(
                                    &transaction.category_id,
                                    &transaction.subcategory_id,
                                ))
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right font-medium whitespace-nowrap " (amount_style(transaction.kind)) }
                            {
                                (signed_amount(transaction, currency))
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                "No transactions found for the selected period."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn amount_style(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "text-green-600 dark:text-green-400",
        TransactionKind::Expense => "text-red-600 dark:text-red-400",
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        category::{CategoryCatalog, CategoryId, SubcategoryId, default_categories},
        currency::Currency,
        transaction::{
            Transaction, TransactionKind,
            table::{format_display_date, transactions_table},
        },
    };

    fn rows(html: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("tbody tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        html.select(&row_selector)
            .map(|row| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn formats_dates_like_jan_5_2024() {
        assert_eq!(format_display_date(date!(2024 - 01 - 05)), "Jan 5, 2024");
        assert_eq!(format_display_date(date!(2023 - 12 - 25)), "Dec 25, 2023");
    }

    #[test]
    fn renders_names_and_signed_amounts() {
        let catalog = CategoryCatalog::new(default_categories());
        let salary = Transaction {
            id: 1,
            amount: 25_000.0,
            description: "Monthly income - Primary Job".to_owned(),
            kind: TransactionKind::Income,
            category_id: CategoryId::new("cat_salary"),
            subcategory_id: SubcategoryId::new("sub_primary"),
            date: date!(2024 - 01 - 25),
        };
        let mystery = Transaction {
            id: 2,
            amount: 12.5,
            description: "Something".to_owned(),
            kind: TransactionKind::Expense,
            category_id: CategoryId::new("cat_deleted"),
            subcategory_id: SubcategoryId::new("sub_gone"),
            date: date!(2024 - 01 - 02),
        };

        let html = Html::parse_fragment(
            &transactions_table(&[&salary, &mystery], &catalog, Currency::Zar).into_string(),
        );

        assert_eq!(
            rows(&html),
            vec![
                vec![
                    "Jan 25, 2024",
                    "Monthly income - Primary Job",
                    "Salary",
                    "Primary Job",
                    "+ R 25,000.00"
                ],
                vec!["Jan 2, 2024", "Something", "Unknown", "Unknown", "- R 12.50"],
            ]
        );
    }

    #[test]
    fn shows_empty_state() {
        let catalog = CategoryCatalog::new(default_categories());

        let html =
            Html::parse_fragment(&transactions_table(&[], &catalog, Currency::Inr).into_string());

        assert_eq!(
            rows(&html),
            vec![vec!["No transactions found for the selected period."]]
        );
    }
}
