//! Database queries for budgets.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    budget::{Budget, NewBudget},
    category::CategoryId,
    period::Period,
};

/// Create the budget table in the database.
///
/// No uniqueness is enforced on (category, month, year); duplicates are
/// rejected by the budget form instead.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_id TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                month INTEGER NOT NULL CHECK (month BETWEEN 0 AND 11),
                year INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Insert a validated budget.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category is not in the database,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn insert_budget(budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    let id = connection
        .prepare(
            "INSERT INTO budget (category_id, amount, month, year)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )?
        .query_row(
            (
                budget.category_id.as_str(),
                budget.amount,
                budget.period.month(),
                budget.period.year(),
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
            ) => Error::InvalidCategory(budget.category_id.clone()),
            error => error.into(),
        })?;

    Ok(budget.into_budget(id))
}

/// Get all budgets, most recent month first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn get_all_budgets(connection: &Connection) -> Result<Vec<Budget>, Error> {
    let rows = connection
        .prepare(
            "SELECT id, category_id, amount, month, year FROM budget
             ORDER BY year DESC, month DESC, id DESC",
        )?
        .query_map([], map_budget_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows.into_iter().flatten().collect())
}

fn map_budget_row(row: &Row) -> Result<Option<Budget>, rusqlite::Error> {
    let id = row.get(0)?;
    let category_id: String = row.get(1)?;
    let month: u8 = row.get(3)?;
    let year: i32 = row.get(4)?;

    let period = match Period::new(year, month) {
        Ok(period) => period,
        Err(error) => {
            tracing::warn!("skipping budget {id}: {error}");
            return Ok(None);
        }
    };

    Ok(Some(Budget {
        id,
        category_id: CategoryId::new(&category_id),
        amount: row.get(2)?,
        period,
    }))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        budget::{
            NewBudget,
            db::{get_all_budgets, insert_budget},
        },
        category::CategoryId,
        db::initialize,
        period::Period,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_budget(category: &str, year: i32, month: u8) -> NewBudget {
        NewBudget {
            category_id: CategoryId::new(category),
            amount: 500.0,
            period: Period::new(year, month).unwrap(),
        }
    }

    #[test]
    fn lists_most_recent_month_first() {
        let conn = get_test_connection();
        insert_budget(new_budget("cat_food", 2023, 11), &conn).unwrap();
        insert_budget(new_budget("cat_food", 2024, 1), &conn).unwrap();
        insert_budget(new_budget("cat_food", 2024, 0), &conn).unwrap();

        let periods: Vec<Period> = get_all_budgets(&conn)
            .unwrap()
            .iter()
            .map(|budget| budget.period)
            .collect();

        assert_eq!(
            periods,
            vec![
                Period::new(2024, 1).unwrap(),
                Period::new(2024, 0).unwrap(),
                Period::new(2023, 11).unwrap(),
            ]
        );
    }

    #[test]
    fn insert_fails_on_unknown_category() {
        let conn = get_test_connection();

        let result = insert_budget(new_budget("cat_yachts", 2024, 0), &conn);

        assert_eq!(
            result,
            Err(Error::InvalidCategory(CategoryId::new("cat_yachts")))
        );
    }

    #[test]
    fn store_allows_duplicate_budgets() {
        let conn = get_test_connection();

        insert_budget(new_budget("cat_food", 2024, 0), &conn).unwrap();
        insert_budget(new_budget("cat_food", 2024, 0), &conn).unwrap();

        assert_eq!(get_all_budgets(&conn).unwrap().len(), 2);
    }
}
