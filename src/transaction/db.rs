//! Database queries for transactions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{CategoryId, SubcategoryId},
    transaction::{NewTransaction, Transaction, TransactionKind},
};

/// Create the transaction table in the database.
///
/// The category and subcategory must exist in the category tables.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount >= 0),
                description TEXT NOT NULL,
                type TEXT NOT NULL,
                category_id TEXT NOT NULL,
                subcategory_id TEXT NOT NULL,
                date TEXT NOT NULL,
                FOREIGN KEY(category_id, subcategory_id)
                    REFERENCES subcategory(category_id, id) ON UPDATE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Insert a validated transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category and subcategory pair is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn insert_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let id = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, description, type, category_id, subcategory_id, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )?
        .query_row(
            (
                transaction.amount,
                &transaction.description,
                transaction.kind,
                transaction.category_id.as_str(),
                transaction.subcategory_id.as_str(),
                transaction.date,
            ),
            |row| row.get(0),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidCategory(transaction.category_id.clone()),
            error => error.into(),
        })?;

    Ok(transaction.into_transaction(id))
}

/// Get all transactions, newest first.
///
/// Rows with a type other than "income" or "expense" cannot be classified
/// and are skipped with a warning.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let rows = connection
        .prepare(
            "SELECT id, amount, description, type, category_id, subcategory_id, date
             FROM \"transaction\"
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().flatten().collect())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Map a database row to a Transaction, or `None` if its type is unknown.
fn map_transaction_row(row: &Row) -> Result<Option<Transaction>, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_kind: String = row.get(3)?;

    let kind = match raw_kind.parse::<TransactionKind>() {
        Ok(kind) => kind,
        Err(error) => {
            tracing::warn!("skipping transaction {id}: {error}");
            return Ok(None);
        }
    };

    let category_id: String = row.get(4)?;
    let subcategory_id: String = row.get(5)?;

    Ok(Some(Transaction {
        id,
        amount: row.get(1)?,
        description: row.get(2)?,
        kind,
        category_id: CategoryId::new(&category_id),
        subcategory_id: SubcategoryId::new(&subcategory_id),
        date: row.get(6)?,
    }))
}
