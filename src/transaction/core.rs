//! Defines the core data models for transactions and the validation of new transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{CategoryCatalog, CategoryId, SubcategoryId},
    database_id::TransactionId,
    date_format::iso_date,
    period::Period,
};

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// The capitalised name for labels, e.g. "Income".
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::InvalidKind(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(ValueRef::Text(self.as_str().as_bytes())))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable once created. To create a new transaction,
/// validate a [TransactionDraft] and pass the resulting [NewTransaction] to a
/// data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned, always non-negative.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
    /// The subcategory within `category_id`.
    pub subcategory_id: SubcategoryId,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl Transaction {
    /// The month the transaction falls in.
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }
}

/// A validated transaction that is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub kind: TransactionKind,
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub date: Date,
}

impl NewTransaction {
    /// Attach the ID assigned by the data source.
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            kind: self.kind,
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            date: self.date,
        }
    }
}

/// Transaction details as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// The amount as typed by the user, e.g. "12.50".
    pub amount: String,
    pub description: String,
    pub kind: TransactionKind,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub date: Date,
}

impl TransactionDraft {
    /// Check the draft against `catalog`.
    ///
    /// Checks run in the order the form shows its fields so the user sees
    /// the first problem first.
    ///
    /// # Errors
    /// - [Error::InvalidAmount] if the amount is not a number greater than zero,
    /// - [Error::EmptyDescription] if the description is blank,
    /// - [Error::MissingCategory] if the category or subcategory was not chosen,
    /// - [Error::InvalidCategory], [Error::KindMismatch] or
    ///   [Error::InvalidSubcategory] if the chosen category does not fit the kind.
    pub fn validate(self, catalog: &CategoryCatalog) -> Result<NewTransaction, Error> {
        let amount = parse_amount(&self.amount)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let (Some(category_id), Some(subcategory_id)) = (self.category_id, self.subcategory_id)
        else {
            return Err(Error::MissingCategory);
        };

        catalog.validate_selection(self.kind, &category_id, &subcategory_id)?;

        Ok(NewTransaction {
            amount,
            description: description.to_owned(),
            kind: self.kind,
            category_id,
            subcategory_id,
            date: self.date,
        })
    }
}

/// Parse a user supplied amount, which must be a finite number greater than zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] otherwise.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount),
    }
}

/// Treat empty select values as "nothing selected".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
