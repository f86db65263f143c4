use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use budget_tracker::{
    CategoryCatalog, DEMO_MONTHS, NewBudget, NewTransaction, count_transactions,
    default_categories, demo_budgets, demo_transactions, initialize_db, insert_budget,
    insert_transaction,
};

/// A utility for creating a database filled with demo data for BudgetTracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();
    let catalog = CategoryCatalog::new(default_categories());

    println!("Creating {DEMO_MONTHS} months of transactions...");

    for transaction in demo_transactions(&catalog, today) {
        let transaction = NewTransaction {
            amount: transaction.amount,
            description: transaction.description,
            kind: transaction.kind,
            category_id: transaction.category_id,
            subcategory_id: transaction.subcategory_id,
            date: transaction.date,
        };

        insert_transaction(transaction, &conn)?;
    }

    println!("Creating budgets...");

    for budget in demo_budgets(today) {
        let budget = NewBudget {
            category_id: budget.category_id,
            amount: budget.amount,
            period: budget.period,
        };

        insert_budget(budget, &conn)?;
    }

    println!(
        "Success! The database holds {} transactions.",
        count_transactions(&conn)?
    );

    Ok(())
}
