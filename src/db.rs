//! Creates the database schema and seeds the category catalog.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    budget::create_budget_table,
    category::{create_category_tables, default_categories, insert_categories},
    transaction::create_transaction_table,
};

/// Create the tables for the domain models and seed the default categories.
///
/// Safe to call on an existing database: tables are only created if missing
/// and existing categories are left untouched.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_tables(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;
    insert_categories(&default_categories(), &transaction)?;

    transaction.commit()?;

    Ok(())
}
