//! Database queries for the category catalog.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryId, Subcategory, SubcategoryId},
    transaction::TransactionKind,
};

/// Create the category and subcategory tables.
///
/// # Errors
/// Returns an error if the tables cannot be created or if there is an SQL error.
pub fn create_category_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('income', 'expense'))
                )",
        (),
    )?;

    // Subcategory IDs are only unique within their category.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS subcategory (
                id TEXT NOT NULL,
                category_id TEXT NOT NULL,
                name TEXT NOT NULL,
                PRIMARY KEY(category_id, id),
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Insert `categories` and their subcategories, skipping any that already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn insert_categories(categories: &[Category], connection: &Connection) -> Result<(), Error> {
    let mut insert_category = connection
        .prepare("INSERT OR IGNORE INTO category (id, name, kind) VALUES (?1, ?2, ?3)")?;
    let mut insert_subcategory = connection.prepare(
        "INSERT OR IGNORE INTO subcategory (id, category_id, name) VALUES (?1, ?2, ?3)",
    )?;

    for category in categories {
        insert_category.execute((category.id.as_str(), &category.name, category.kind))?;

        for subcategory in &category.subcategories {
            insert_subcategory.execute((
                subcategory.id.as_str(),
                category.id.as_str(),
                &subcategory.name,
            ))?;
        }
    }

    Ok(())
}

/// Get all categories ordered by name, each with its subcategories ordered by name.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    let mut subcategories_by_category: HashMap<String, Vec<Subcategory>> = HashMap::new();

    let subcategory_rows = connection
        .prepare("SELECT category_id, id, name FROM subcategory ORDER BY name")?
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for (category_id, id, name) in subcategory_rows {
        subcategories_by_category
            .entry(category_id)
            .or_default()
            .push(Subcategory {
                id: SubcategoryId::new(&id),
                name,
            });
    }

    let category_rows = connection
        .prepare("SELECT id, name, kind FROM category ORDER BY name")?
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    category_rows
        .into_iter()
        .map(|(id, name, kind)| {
            Ok(Category {
                kind: kind.parse::<TransactionKind>()?,
                subcategories: subcategories_by_category.remove(&id).unwrap_or_default(),
                id: CategoryId::new(&id),
                name,
            })
        })
        .collect()
}
