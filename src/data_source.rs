//! Where transactions, budgets and categories are read from and written to.
//!
//! The server picks one implementation at startup: [SqliteDataSource] for a
//! database file, or [FixtureDataSource] for an in-memory set of demo data.

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, RwLock},
};

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    budget::{Budget, NewBudget, get_all_budgets, insert_budget},
    category::{Category, CategoryCatalog, get_all_categories},
    db::initialize,
    fixture::{demo_budgets, demo_transactions},
    transaction::{NewTransaction, Transaction, get_all_transactions, insert_transaction},
};

/// Which [DataSource] implementation to serve data from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DataSourceKind {
    /// A SQLite database file.
    #[default]
    Sqlite,
    /// Generated demo data kept in memory, lost on restart.
    Fixture,
}

/// Reads and appends the records of the app.
///
/// Records are never updated or deleted once created.
pub trait DataSource: Debug + Send + Sync {
    /// All transactions, ordered by date descending, then by ID descending.
    fn list_transactions(&self) -> Result<Vec<Transaction>, Error>;

    /// All budgets, ordered by year descending, then by month descending.
    fn list_budgets(&self) -> Result<Vec<Budget>, Error>;

    /// All categories ordered by name, each with subcategories ordered by name.
    fn list_categories(&self) -> Result<Vec<Category>, Error>;

    /// Store a new transaction and return it with its assigned ID.
    fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Store a new budget and return it with its assigned ID.
    fn create_budget(&self, budget: NewBudget) -> Result<Budget, Error>;

    /// The category catalog built from [DataSource::list_categories].
    fn catalog(&self) -> Result<CategoryCatalog, Error> {
        self.list_categories().map(CategoryCatalog::new)
    }
}

/// Stores records in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteDataSource {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteDataSource {
    /// Create a data source for `connection`, creating the tables and the
    /// default categories if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl DataSource for SqliteDataSource {
    fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        get_all_transactions(&*self.lock()?)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>, Error> {
        get_all_budgets(&*self.lock()?)
    }

    fn list_categories(&self) -> Result<Vec<Category>, Error> {
        get_all_categories(&*self.lock()?)
    }

    fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        insert_transaction(transaction, &*self.lock()?)
    }

    fn create_budget(&self, budget: NewBudget) -> Result<Budget, Error> {
        insert_budget(budget, &*self.lock()?)
    }
}

/// Keeps records in memory, seeded with demo data.
#[derive(Debug)]
pub struct FixtureDataSource {
    catalog: CategoryCatalog,
    transactions: RwLock<Vec<Transaction>>,
    budgets: RwLock<Vec<Budget>>,
}

impl FixtureDataSource {
    /// Create a data source with six months of demo data ending in the
    /// month of `today`.
    pub fn new(catalog: CategoryCatalog, today: Date) -> Self {
        let transactions = demo_transactions(&catalog, today);
        let budgets = demo_budgets(today);

        Self::with_records(catalog, transactions, budgets)
    }

    /// Create a data source holding exactly the given records.
    pub fn with_records(
        catalog: CategoryCatalog,
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
    ) -> Self {
        Self {
            catalog,
            transactions: RwLock::new(transactions),
            budgets: RwLock::new(budgets),
        }
    }
}

impl DataSource for FixtureDataSource {
    fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let mut transactions = self
            .transactions
            .read()
            .map_err(|_| Error::DatabaseLockError)?
            .clone();

        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(transactions)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>, Error> {
        let mut budgets = self
            .budgets
            .read()
            .map_err(|_| Error::DatabaseLockError)?
            .clone();

        budgets.sort_by(|a, b| b.period.cmp(&a.period).then(b.id.cmp(&a.id)));

        Ok(budgets)
    }

    fn list_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.catalog.categories().to_vec())
    }

    fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let known_pair = self
            .catalog
            .get(&transaction.category_id)
            .and_then(|category| category.subcategory(&transaction.subcategory_id))
            .is_some();

        if !known_pair {
            return Err(Error::InvalidCategory(transaction.category_id));
        }

        let mut transactions = self
            .transactions
            .write()
            .map_err(|_| Error::DatabaseLockError)?;

        let id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let transaction = transaction.into_transaction(id);
        transactions.push(transaction.clone());

        Ok(transaction)
    }

    fn create_budget(&self, budget: NewBudget) -> Result<Budget, Error> {
        if self.catalog.get(&budget.category_id).is_none() {
            return Err(Error::InvalidCategory(budget.category_id));
        }

        let mut budgets = self.budgets.write().map_err(|_| Error::DatabaseLockError)?;

        let id = budgets.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let budget = budget.into_budget(id);
        budgets.push(budget.clone());

        Ok(budget)
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        budget::NewBudget,
        category::{CategoryCatalog, CategoryId, SubcategoryId, default_categories},
        data_source::{DataSource, FixtureDataSource, SqliteDataSource},
        period::Period,
        transaction::{NewTransaction, TransactionKind},
    };

    fn sqlite() -> SqliteDataSource {
        SqliteDataSource::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn empty_fixture() -> FixtureDataSource {
        FixtureDataSource::with_records(
            CategoryCatalog::new(default_categories()),
            Vec::new(),
            Vec::new(),
        )
    }

    fn expense_on(date: time::Date) -> NewTransaction {
        NewTransaction {
            amount: 42.0,
            description: "Fuel".to_owned(),
            kind: TransactionKind::Expense,
            category_id: CategoryId::new("cat_transport"),
            subcategory_id: SubcategoryId::new("sub_fuel"),
            date,
        }
    }

    fn food_budget(year: i32, month: u8) -> NewBudget {
        NewBudget {
            category_id: CategoryId::new("cat_food"),
            amount: 100.0,
            period: Period::new(year, month).unwrap(),
        }
    }

    // Both implementations must honour the same ordering contract.
    fn assert_listing_contract(source: &dyn DataSource) {
        source
            .create_transaction(expense_on(date!(2024 - 01 - 10)))
            .unwrap();
        source
            .create_transaction(expense_on(date!(2024 - 03 - 01)))
            .unwrap();
        source
            .create_transaction(expense_on(date!(2024 - 01 - 10)))
            .unwrap();
        source.create_budget(food_budget(2023, 11)).unwrap();
        source.create_budget(food_budget(2024, 2)).unwrap();

        let transactions = source.list_transactions().unwrap();
        let dates_and_ids: Vec<_> = transactions.iter().map(|t| (t.date, t.id)).collect();
        assert_eq!(
            dates_and_ids,
            vec![
                (date!(2024 - 03 - 01), 2),
                (date!(2024 - 01 - 10), 3),
                (date!(2024 - 01 - 10), 1),
            ]
        );

        let periods: Vec<_> = source
            .list_budgets()
            .unwrap()
            .iter()
            .map(|budget| budget.period)
            .collect();
        assert_eq!(
            periods,
            vec![Period::new(2024, 2).unwrap(), Period::new(2023, 11).unwrap()]
        );

        let names: Vec<String> = source
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|category| category.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn sqlite_honours_listing_contract() {
        assert_listing_contract(&sqlite());
    }

    #[test]
    fn fixture_honours_listing_contract() {
        assert_listing_contract(&empty_fixture());
    }

    #[test]
    fn both_reject_unknown_subcategory() {
        let transaction = NewTransaction {
            subcategory_id: SubcategoryId::new("sub_groceries"),
            ..expense_on(date!(2024 - 01 - 10))
        };
        let want = Err(Error::InvalidCategory(CategoryId::new("cat_transport")));

        assert_eq!(sqlite().create_transaction(transaction.clone()), want);
        assert_eq!(empty_fixture().create_transaction(transaction), want);
    }

    #[test]
    fn fixture_is_seeded_with_demo_data() {
        let source = FixtureDataSource::new(
            CategoryCatalog::new(default_categories()),
            date!(2024 - 06 - 15),
        );

        assert!(!source.list_transactions().unwrap().is_empty());
        assert!(!source.list_budgets().unwrap().is_empty());
    }
}
