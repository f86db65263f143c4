//! The category catalog a new database is seeded with.

use crate::{
    category::{Category, CategoryId, Subcategory, SubcategoryId},
    transaction::TransactionKind,
};

const EXPENSE_CATEGORIES: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "cat_housing",
        "Housing",
        &[
            ("sub_rent", "Rent"),
            ("sub_mortgage", "Mortgage"),
            ("sub_utilities", "Utilities"),
            ("sub_maintenance", "Maintenance"),
        ],
    ),
    (
        "cat_food",
        "Food",
        &[
            ("sub_groceries", "Groceries"),
            ("sub_dining", "Dining Out"),
            ("sub_delivery", "Food Delivery"),
        ],
    ),
    (
        "cat_transport",
        "Transportation",
        &[
            ("sub_fuel", "Fuel"),
            ("sub_public", "Public Transit"),
            ("sub_maintenance", "Car Maintenance"),
            ("sub_rideshare", "Rideshare"),
        ],
    ),
    (
        "cat_entertainment",
        "Entertainment",
        &[
            ("sub_streaming", "Streaming Services"),
            ("sub_events", "Events & Movies"),
            ("sub_hobbies", "Hobbies"),
        ],
    ),
    (
        "cat_health",
        "Health",
        &[
            ("sub_insurance", "Insurance"),
            ("sub_medical", "Medical Expenses"),
            ("sub_fitness", "Fitness"),
        ],
    ),
    (
        "cat_misc",
        "Miscellaneous",
        &[("sub_gifts", "Gifts"), ("sub_other", "Other")],
    ),
];

const INCOME_CATEGORIES: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "cat_salary",
        "Salary",
        &[
            ("sub_primary", "Primary Job"),
            ("sub_side", "Side Hustle"),
            ("sub_bonus", "Bonus"),
        ],
    ),
    (
        "cat_investments",
        "Investments",
        &[
            ("sub_dividends", "Dividends"),
            ("sub_interest", "Interest"),
            ("sub_capital", "Capital Gains"),
        ],
    ),
    (
        "cat_other_income",
        "Other Income",
        &[("sub_gifts", "Gifts"), ("sub_other", "Other")],
    ),
];

/// The default categories, expense categories first.
pub fn default_categories() -> Vec<Category> {
    let expenses = EXPENSE_CATEGORIES
        .iter()
        .map(|entry| build_category(entry, TransactionKind::Expense));
    let income = INCOME_CATEGORIES
        .iter()
        .map(|entry| build_category(entry, TransactionKind::Income));

    expenses.chain(income).collect()
}

fn build_category(
    (id, name, subcategories): &(&str, &str, &[(&str, &str)]),
    kind: TransactionKind,
) -> Category {
    Category {
        id: CategoryId::new(id),
        name: (*name).to_owned(),
        kind,
        subcategories: subcategories
            .iter()
            .map(|(id, name)| Subcategory {
                id: SubcategoryId::new(id),
                name: (*name).to_owned(),
            })
            .collect(),
    }
}
