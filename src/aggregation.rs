//! Reduces transactions to the totals, breakdowns and monthly series shown by
//! the dashboard and the budget list.
//!
//! Every function here is pure and works on a snapshot of transactions, so
//! an empty snapshot yields empty or zero results rather than an error.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    category::{CategoryCatalog, CategoryId},
    period::Period,
    transaction::{Transaction, TransactionKind},
};

/// The transactions dated within `period`, in their original order.
pub fn filter_by_period(transactions: &[Transaction], period: Period) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| period.contains(transaction.date))
        .collect()
}

/// Income and expense summed over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Sum the amounts of `transactions` by kind.
pub fn calculate_totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Totals::default(), |mut totals, transaction| {
            match transaction.kind {
                TransactionKind::Income => totals.income += transaction.amount,
                TransactionKind::Expense => totals.expense += transaction.amount,
            }

            totals
        })
}

/// The expenses of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub category_id: CategoryId,
    pub amount: f64,
}

/// Sum expenses per category, ordered by category ID.
///
/// Income is ignored and categories without expenses are left out.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryAmount>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut amounts: BTreeMap<&CategoryId, f64> = BTreeMap::new();

    for transaction in transactions {
        if transaction.kind == TransactionKind::Expense {
            *amounts.entry(&transaction.category_id).or_insert(0.0) += transaction.amount;
        }
    }

    amounts
        .into_iter()
        .map(|(category_id, amount)| CategoryAmount {
            category_id: category_id.clone(),
            amount,
        })
        .collect()
}

/// The amount for `category_id` in `breakdown`, zero if it is absent.
pub fn amount_for_category(breakdown: &[CategoryAmount], category_id: &CategoryId) -> f64 {
    breakdown
        .iter()
        .find(|entry| &entry.category_id == category_id)
        .map_or(0.0, |entry| entry.amount)
}

/// Income, expenses and expenses per category for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPeriodSummary {
    pub period: Period,
    pub income_total: f64,
    pub expense_total: f64,
    pub categories: Vec<CategoryAmount>,
}

/// Summarise every month that has transactions, oldest month first.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyPeriodSummary> {
    let periods: BTreeSet<Period> = transactions
        .iter()
        .map(|transaction| transaction.period())
        .collect();

    periods
        .into_iter()
        .map(|period| {
            let in_period = filter_by_period(transactions, period);
            let totals = calculate_totals(in_period.iter().copied());

            MonthlyPeriodSummary {
                period,
                income_total: totals.income,
                expense_total: totals.expense,
                categories: category_breakdown(in_period),
            }
        })
        .collect()
}

/// How much of a budget has been spent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUtilization {
    /// Percentage spent, rounded and capped at 100 for display.
    pub percentage: u8,
    pub is_over_budget: bool,
}

/// Compare the amount `spent` in a category against its `budgeted` amount.
///
/// A zero budget counts as fully used (and over budget) as soon as anything
/// is spent.
pub fn compare_budget(budgeted: f64, spent: f64) -> BudgetUtilization {
    if budgeted <= 0.0 {
        let has_spend = spent > 0.0;

        return BudgetUtilization {
            percentage: if has_spend { 100 } else { 0 },
            is_over_budget: has_spend,
        };
    }

    let percentage = (spent / budgeted * 100.0).round().clamp(0.0, 100.0) as u8;

    BudgetUtilization {
        percentage,
        is_over_budget: spent > budgeted,
    }
}

/// Income and expenses per month, ready for a line chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewSeries {
    /// Month labels such as "Jan 2024".
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

pub fn overview_series(series: &[MonthlyPeriodSummary]) -> OverviewSeries {
    OverviewSeries {
        labels: series
            .iter()
            .map(|summary| summary.period.short_label())
            .collect(),
        income: series.iter().map(|summary| summary.income_total).collect(),
        expense: series.iter().map(|summary| summary.expense_total).collect(),
    }
}

/// The monthly expenses of one category, one value per month of the series.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub category_id: CategoryId,
    /// The display name, only used to label the series.
    pub name: String,
    pub values: Vec<f64>,
}

/// One series per expense category in `catalog`, with zero for months where
/// the category has no expenses.
pub fn category_series(
    series: &[MonthlyPeriodSummary],
    catalog: &CategoryCatalog,
) -> Vec<CategorySeries> {
    catalog
        .of_kind(TransactionKind::Expense)
        .map(|category| CategorySeries {
            category_id: category.id.clone(),
            name: category.name.clone(),
            values: series
                .iter()
                .map(|summary| amount_for_category(&summary.categories, &category.id))
                .collect(),
        })
        .collect()
}
