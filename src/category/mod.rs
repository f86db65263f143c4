//! The two-level category taxonomy that transactions and budgets are filed under.

mod api;
mod db;
mod defaults;
mod domain;

pub use api::list_categories_api;
pub use db::{create_category_tables, get_all_categories, insert_categories};
pub use defaults::default_categories;
pub use domain::{Category, CategoryCatalog, CategoryId, Subcategory, SubcategoryId};
