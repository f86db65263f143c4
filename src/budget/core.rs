//! Defines the budget model and the validation of new budgets.

use serde::Serialize;

use crate::{
    Error,
    category::{CategoryCatalog, CategoryId},
    database_id::BudgetId,
    period::Period,
    transaction::{TransactionKind, parse_amount},
};

/// A spending target for an expense category in a given month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub category_id: CategoryId,
    /// The most that should be spent in the category during `period`.
    pub amount: f64,
    #[serde(flatten)]
    pub period: Period,
}

/// A validated budget that is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category_id: CategoryId,
    pub amount: f64,
    pub period: Period,
}

impl NewBudget {
    /// Attach the ID assigned by the data source.
    pub fn into_budget(self, id: BudgetId) -> Budget {
        Budget {
            id,
            category_id: self.category_id,
            amount: self.amount,
            period: self.period,
        }
    }
}

/// Budget details as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDraft {
    pub category_id: Option<CategoryId>,
    /// The amount as typed by the user.
    pub amount: String,
    pub period: Period,
}

impl BudgetDraft {
    /// Check the draft against `catalog`.
    ///
    /// # Errors
    /// - [Error::InvalidAmount] if the amount is not a number greater than zero,
    /// - [Error::MissingCategory] if no category was chosen,
    /// - [Error::InvalidCategory] if the category does not exist,
    /// - [Error::IncomeCategoryBudget] if the category is an income category.
    pub fn validate(self, catalog: &CategoryCatalog) -> Result<NewBudget, Error> {
        let amount = parse_amount(&self.amount)?;

        let category_id = self.category_id.ok_or(Error::MissingCategory)?;

        let category = catalog
            .get(&category_id)
            .ok_or_else(|| Error::InvalidCategory(category_id.clone()))?;

        if category.kind != TransactionKind::Expense {
            return Err(Error::IncomeCategoryBudget(category_id));
        }

        Ok(NewBudget {
            category_id,
            amount,
            period: self.period,
        })
    }
}

/// The budgets set for `period`.
pub fn budgets_in_period(budgets: &[Budget], period: Period) -> Vec<&Budget> {
    budgets
        .iter()
        .filter(|budget| budget.period == period)
        .collect()
}

/// Check that no budget exists yet for the same category and month as `budget`.
///
/// # Errors
/// Returns [Error::DuplicateBudget] if one does.
pub fn ensure_unique(
    budget: &NewBudget,
    existing: &[Budget],
    catalog: &CategoryCatalog,
) -> Result<(), Error> {
    let is_duplicate = existing.iter().any(|other| {
        other.category_id == budget.category_id && other.period == budget.period
    });

    if is_duplicate {
        return Err(Error::DuplicateBudget {
            category: catalog.category_name(&budget.category_id).to_owned(),
            period: budget.period,
        });
    }

    Ok(())
}
