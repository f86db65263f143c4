//! Demo data for trying the app without a database.
//!
//! The generated records only depend on the date passed in, so repeated runs
//! on the same day produce the same data.

use time::{Date, Month};

use crate::{
    budget::Budget,
    category::{Category, CategoryCatalog, CategoryId},
    period::Period,
    transaction::{Transaction, TransactionKind},
};

/// How many months of transactions are generated, ending with the current month.
pub const DEMO_MONTHS: usize = 6;

const MIN_TRANSACTIONS_PER_MONTH: usize = 10;
const EXTRA_TRANSACTIONS_PER_MONTH: usize = 11;

/// Budgets set for the current and previous month.
const DEMO_BUDGETS: &[(&str, f64)] = &[
    ("cat_housing", 12_000.0),
    ("cat_food", 4_500.0),
    ("cat_transport", 2_000.0),
    ("cat_entertainment", 1_000.0),
    ("cat_health", 1_500.0),
];

/// Generate [DEMO_MONTHS] months of transactions ending in the month of `today`.
///
/// Each month gets between 10 and 20 transactions, roughly one in four of
/// them income. IDs start at 1 and follow the order of generation.
pub fn demo_transactions(catalog: &CategoryCatalog, today: Date) -> Vec<Transaction> {
    let income: Vec<&Category> = catalog.of_kind(TransactionKind::Income).collect();
    let expense: Vec<&Category> = catalog.of_kind(TransactionKind::Expense).collect();

    if income.is_empty() || expense.is_empty() {
        tracing::warn!("catalog is missing income or expense categories, no demo transactions");
        return Vec::new();
    }

    let mut transactions = Vec::new();

    for (month_index, period) in Period::recent(today, DEMO_MONTHS)
        .into_iter()
        .rev()
        .enumerate()
    {
        let count =
            MIN_TRANSACTIONS_PER_MONTH + (month_index * 7 + 3) % EXTRA_TRANSACTIONS_PER_MONTH;

        for index in 0..count {
            let seed = month_index * 31 + index * 17;
            let kind = if index % 4 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };

            let pool = match kind {
                TransactionKind::Income => &income,
                TransactionKind::Expense => &expense,
            };
            let category = pool[seed % pool.len()];
            let Some(subcategory) = category
                .subcategories
                .get(seed / pool.len() % category.subcategories.len().max(1))
            else {
                continue;
            };

            let amount = match kind {
                TransactionKind::Income => 5_000.0 + ((seed * 1_733) % 20_000) as f64,
                TransactionKind::Expense => 50.0 + ((seed * 389) % 2_000) as f64,
            };

            let description = match kind {
                TransactionKind::Income => format!("Monthly income - {}", subcategory.name),
                TransactionKind::Expense => format!("{} - {}", category.name, subcategory.name),
            };

            let Some(date) = day_in(period, 1 + (seed % 28) as u8) else {
                continue;
            };

            transactions.push(Transaction {
                id: transactions.len() as i64 + 1,
                amount,
                description,
                kind,
                category_id: category.id.clone(),
                subcategory_id: subcategory.id.clone(),
                date,
            });
        }
    }

    transactions
}

/// Budgets for a handful of expense categories in the month of `today` and
/// the month before.
pub fn demo_budgets(today: Date) -> Vec<Budget> {
    Period::recent(today, 2)
        .into_iter()
        .rev()
        .flat_map(|period| {
            DEMO_BUDGETS
                .iter()
                .map(move |(category_id, amount)| (period, *category_id, *amount))
        })
        .enumerate()
        .map(|(index, (period, category_id, amount))| Budget {
            id: index as i64 + 1,
            category_id: CategoryId::new(category_id),
            amount,
            period,
        })
        .collect()
}

fn day_in(period: Period, day: u8) -> Option<Date> {
    let month = Month::try_from(period.month() + 1).ok()?;

    Date::from_calendar_date(period.year(), month, day).ok()
}
