//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;
/// The row ID of a transaction.
pub type TransactionId = DatabaseId;
/// The row ID of a budget.
pub type BudgetId = DatabaseId;
