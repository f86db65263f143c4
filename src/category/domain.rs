//! Core category domain types and the category catalog.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::TransactionKind};

/// The name displayed for a category or subcategory that cannot be found.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Identifier of a category, e.g. "cat_food".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a subcategory, e.g. "sub_groceries".
///
/// Only unique within its parent category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcategoryId(String);

impl SubcategoryId {
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SubcategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The second level of the category taxonomy, e.g. "Groceries" under "Food".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
}

/// A category of transactions that owns its subcategories.
///
/// Each category belongs to exactly one pool: income categories can only be
/// used by income transactions, expense categories by expenses and budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: TransactionKind,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// Find one of this category's subcategories.
    pub fn subcategory(&self, subcategory_id: &SubcategoryId) -> Option<&Subcategory> {
        self.subcategories
            .iter()
            .find(|subcategory| &subcategory.id == subcategory_id)
    }
}

/// The set of categories that transactions and budgets refer to.
///
/// Categories and their subcategories are kept ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        for category in categories.iter_mut() {
            category.subcategories.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    pub fn get(&self, category_id: &CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| &category.id == category_id)
    }

    /// The categories that transactions of `kind` may use.
    pub fn of_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |category| category.kind == kind)
    }

    /// The display name of a category, or [UNKNOWN_LABEL] if it does not exist.
    pub fn category_name(&self, category_id: &CategoryId) -> &str {
        self.get(category_id)
            .map(|category| category.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// The display name of a subcategory, or [UNKNOWN_LABEL] if either the
    /// category or the subcategory does not exist.
    pub fn subcategory_name(
        &self,
        category_id: &CategoryId,
        subcategory_id: &SubcategoryId,
    ) -> &str {
        self.get(category_id)
            .and_then(|category| category.subcategory(subcategory_id))
            .map(|subcategory| subcategory.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Check that a transaction of `kind` may be filed under the given
    /// category and subcategory.
    ///
    /// # Errors
    /// - [Error::InvalidCategory] if the category does not exist,
    /// - [Error::KindMismatch] if the category belongs to the other pool,
    /// - [Error::InvalidSubcategory] if the subcategory is not part of the category.
    pub fn validate_selection(
        &self,
        kind: TransactionKind,
        category_id: &CategoryId,
        subcategory_id: &SubcategoryId,
    ) -> Result<(), Error> {
        let category = self
            .get(category_id)
            .ok_or_else(|| Error::InvalidCategory(category_id.clone()))?;

        if category.kind != kind {
            return Err(Error::KindMismatch {
                kind,
                category: category.name.clone(),
            });
        }

        if category.subcategory(subcategory_id).is_none() {
            return Err(Error::InvalidSubcategory(subcategory_id.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        category::{CategoryCatalog, CategoryId, SubcategoryId, default_categories},
        transaction::TransactionKind,
    };

    use super::UNKNOWN_LABEL;

    fn catalog() -> CategoryCatalog {
        CategoryCatalog::new(default_categories())
    }

    #[test]
    fn resolves_category_and_subcategory_names() {
        let catalog = catalog();
        let food = CategoryId::new("cat_food");

        assert_eq!(catalog.category_name(&food), "Food");
        assert_eq!(
            catalog.subcategory_name(&food, &SubcategoryId::new("sub_dining")),
            "Dining Out"
        );
    }

    #[test]
    fn unknown_category_resolves_to_unknown() {
        let catalog = catalog();
        let missing = CategoryId::new("cat_does_not_exist");

        assert_eq!(catalog.category_name(&missing), UNKNOWN_LABEL);
        assert_eq!(
            catalog.subcategory_name(&missing, &SubcategoryId::new("sub_rent")),
            UNKNOWN_LABEL
        );
    }

    #[test]
    fn subcategory_ids_are_scoped_to_their_category() {
        let catalog = catalog();
        let maintenance = SubcategoryId::new("sub_maintenance");

        assert_eq!(
            catalog.subcategory_name(&CategoryId::new("cat_housing"), &maintenance),
            "Maintenance"
        );
        assert_eq!(
            catalog.subcategory_name(&CategoryId::new("cat_transport"), &maintenance),
            "Car Maintenance"
        );
        assert_eq!(
            catalog.subcategory_name(&CategoryId::new("cat_food"), &maintenance),
            UNKNOWN_LABEL
        );
    }

    #[test]
    fn categories_and_subcategories_are_sorted_by_name() {
        let catalog = catalog();

        let names: Vec<&str> = catalog
            .categories()
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        for category in catalog.categories() {
            let names: Vec<&str> = category
                .subcategories
                .iter()
                .map(|subcategory| subcategory.name.as_str())
                .collect();
            let mut sorted = names.clone();
            sorted.sort();
            assert_eq!(names, sorted, "subcategories of {}", category.name);
        }
    }

    #[test]
    fn income_and_expense_pools_are_disjoint() {
        let catalog = catalog();

        for income in catalog.of_kind(TransactionKind::Income) {
            assert!(
                catalog
                    .of_kind(TransactionKind::Expense)
                    .all(|expense| expense.id != income.id),
                "{} is in both pools",
                income.id
            );
        }
    }

    #[test]
    fn validate_selection_checks_pool_and_subcategory() {
        let catalog = catalog();
        let salary = CategoryId::new("cat_salary");
        let primary = SubcategoryId::new("sub_primary");

        assert_eq!(
            catalog.validate_selection(TransactionKind::Income, &salary, &primary),
            Ok(())
        );
        assert!(matches!(
            catalog.validate_selection(TransactionKind::Expense, &salary, &primary),
            Err(Error::KindMismatch { .. })
        ));
        assert_eq!(
            catalog.validate_selection(
                TransactionKind::Income,
                &salary,
                &SubcategoryId::new("sub_rent")
            ),
            Err(Error::InvalidSubcategory(SubcategoryId::new("sub_rent")))
        );
        assert_eq!(
            catalog.validate_selection(
                TransactionKind::Income,
                &CategoryId::new("cat_lottery"),
                &primary
            ),
            Err(Error::InvalidCategory(CategoryId::new("cat_lottery")))
        );
    }
}
